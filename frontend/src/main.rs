use shared::OperationKind;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{ChartCanvas, NotificationBanner, OperationForm, OperationTable};
use hooks::use_dashboard;
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let dashboard = use_dashboard(&api_client);
    let state = &dashboard.state;
    let actions = &dashboard.actions;

    html! {
        <div class="dashboard">
            <NotificationBanner
                notification={state.notification.clone()}
                on_dismiss={actions.dismiss_notification.clone()}
            />

            <header class="dashboard-header">
                <h1>{"Budget dashboard"}</h1>
                <button class="btn-refresh" onclick={actions.refresh.reform(|_: MouseEvent| ())}>
                    {"Refresh"}
                </button>
                <div class="balance">
                    <span class="balance-label">{"Balance"}</span>
                    <span id="solde" class="balance-value">{&state.view.balance}</span>
                </div>
            </header>

            <OperationForm
                kind={state.kind}
                amount={state.amount.clone()}
                description={state.description.clone()}
                submitting={state.submitting}
                on_kind_change={actions.on_kind_change.clone()}
                on_amount_change={actions.on_amount_change.clone()}
                on_description_change={actions.on_description_change.clone()}
                on_submit={actions.submit.clone()}
            />

            <div class="tables">
                <OperationTable
                    kind={OperationKind::Income}
                    rows={state.view.income_rows.clone()}
                    loading={state.loading}
                    on_delete={actions.delete.clone()}
                    on_edit={actions.edit.clone()}
                />
                <OperationTable
                    kind={OperationKind::Expense}
                    rows={state.view.expense_rows.clone()}
                    loading={state.loading}
                    on_delete={actions.delete.clone()}
                    on_edit={actions.edit.clone()}
                />
            </div>

            <div class="charts">
                <ChartCanvas spec={state.view.expense_chart.clone()} loading={state.loading} />
                <ChartCanvas spec={state.view.evolution_chart.clone()} loading={state.loading} />
            </div>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
