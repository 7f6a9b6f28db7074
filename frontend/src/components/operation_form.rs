use shared::OperationKind;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OperationFormProps {
    pub kind: OperationKind,
    pub amount: String,
    pub description: String,
    pub submitting: bool,
    pub on_kind_change: Callback<Event>,
    pub on_amount_change: Callback<Event>,
    pub on_description_change: Callback<Event>,
    pub on_submit: Callback<()>,
}

/// Creation form: kind, amount, and the source or category
#[function_component(OperationForm)]
pub fn operation_form(props: &OperationFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let placeholder = match props.kind {
        OperationKind::Income => "Source (e.g. Salary)",
        OperationKind::Expense => "Category (e.g. Groceries)",
    };

    html! {
        <section class="operation-form-section">
            <h2>{"New operation"}</h2>
            <form id="operation-form" class="operation-form" {onsubmit}>
                <select id="type" onchange={props.on_kind_change.clone()} disabled={props.submitting}>
                    <option
                        value={OperationKind::Income.as_str()}
                        selected={props.kind == OperationKind::Income}
                    >
                        {"Income"}
                    </option>
                    <option
                        value={OperationKind::Expense.as_str()}
                        selected={props.kind == OperationKind::Expense}
                    >
                        {"Expense"}
                    </option>
                </select>
                <input
                    id="montant"
                    type="text"
                    inputmode="decimal"
                    placeholder="Amount"
                    value={props.amount.clone()}
                    onchange={props.on_amount_change.clone()}
                    disabled={props.submitting}
                />
                <input
                    id="description"
                    type="text"
                    placeholder={placeholder}
                    value={props.description.clone()}
                    onchange={props.on_description_change.clone()}
                    disabled={props.submitting}
                />
                <button type="submit" disabled={props.submitting}>
                    {if props.submitting { "Adding..." } else { "Add" }}
                </button>
            </form>
        </section>
    }
}
