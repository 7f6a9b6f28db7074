use shared::presentation::OperationRow;
use shared::OperationKind;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OperationTableProps {
    pub kind: OperationKind,
    pub rows: Vec<OperationRow>,
    pub loading: bool,
    pub on_delete: Callback<OperationRow>,
    pub on_edit: Callback<OperationRow>,
}

fn title_for(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Income => "Income",
        OperationKind::Expense => "Expenses",
    }
}

fn label_heading(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Income => "Source",
        OperationKind::Expense => "Category",
    }
}

#[function_component(OperationTable)]
pub fn operation_table(props: &OperationTableProps) -> Html {
    let table_id = match props.kind {
        OperationKind::Income => "revenus-table",
        OperationKind::Expense => "depenses-table",
    };

    html! {
        <section class="operations-section">
            <h2>{title_for(props.kind)}</h2>

            {if props.loading && props.rows.is_empty() {
                html! { <div class="loading">{"Loading operations..."}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table id={table_id} class="operations-table">
                            <thead>
                                <tr>
                                    <th>{"Amount"}</th>
                                    <th>{label_heading(props.kind)}</th>
                                    <th>{"Actions"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.rows.iter().map(|row| {
                                    let on_delete = {
                                        let row = row.clone();
                                        props.on_delete.reform(move |_: MouseEvent| row.clone())
                                    };
                                    let on_edit = {
                                        let row = row.clone();
                                        props.on_edit.reform(move |_: MouseEvent| row.clone())
                                    };

                                    html! {
                                        <tr key={row.id.clone()}>
                                            <td class="amount">{row.display_amount()}</td>
                                            <td class="label">{&row.label}</td>
                                            <td class="actions">
                                                <button class="btn-delete" onclick={on_delete}>{"Delete"}</button>
                                                <button class="btn-edit" onclick={on_edit}>{"Modify"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
