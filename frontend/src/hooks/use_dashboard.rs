use gloo::timers::future::TimeoutFuture;
use shared::forms::{build_update, validate_new_operation};
use shared::presentation::{DashboardView, OperationRow};
use shared::{DashboardError, OperationKind};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "dashboard";
const NOTIFICATION_TIMEOUT_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Banner message. It disappears on its own after a few seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(error: &DashboardError) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: error.user_message(),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct DashboardState {
    pub view: DashboardView,
    pub loading: bool,

    // Creation form
    pub kind: OperationKind,
    pub amount: String,
    pub description: String,
    pub submitting: bool,

    pub notification: Option<Notification>,
}

pub struct UseDashboardResult {
    pub state: DashboardState,
    pub actions: DashboardActions,
}

#[derive(Clone, PartialEq)]
pub struct DashboardActions {
    pub refresh: Callback<()>,
    pub submit: Callback<()>,
    pub delete: Callback<OperationRow>,
    pub edit: Callback<OperationRow>,
    pub on_kind_change: Callback<Event>,
    pub on_amount_change: Callback<Event>,
    pub on_description_change: Callback<Event>,
    pub dismiss_notification: Callback<()>,
}

fn report_error(notify: &Callback<Notification>, context: &str, error: &DashboardError) {
    Logger::error_with_component(COMPONENT, &format!("{}: {}", context, error));
    notify.emit(Notification::error(error));
}

#[hook]
pub fn use_dashboard(api_client: &ApiClient) -> UseDashboardResult {
    let view = use_state(DashboardView::default);
    let loading = use_state(|| true);

    let kind = use_state(|| OperationKind::Income);
    let amount = use_state(String::new);
    let description = use_state(String::new);
    let submitting = use_state(|| false);

    let notification = use_state(|| None::<Notification>);
    // Bumped on every new notification so a stale timeout leaves the newer one alone
    let notification_seq = use_mut_ref(|| 0u32);

    let notify = {
        let notification = notification.clone();
        let notification_seq = notification_seq.clone();

        use_callback((), move |next: Notification, _| {
            let current = {
                let mut seq = notification_seq.borrow_mut();
                *seq = seq.wrapping_add(1);
                *seq
            };
            notification.set(Some(next));

            let notification = notification.clone();
            let notification_seq = notification_seq.clone();
            spawn_local(async move {
                TimeoutFuture::new(NOTIFICATION_TIMEOUT_MS).await;
                if *notification_seq.borrow() == current {
                    notification.set(None);
                }
            });
        })
    };

    let dismiss_notification = {
        let notification = notification.clone();
        use_callback((), move |_: (), _| notification.set(None))
    };

    // Full reload; on failure the previous view stays on screen
    let refresh = {
        let api_client = api_client.clone();
        let view = view.clone();
        let loading = loading.clone();
        let notify = notify.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let view = view.clone();
            let loading = loading.clone();
            let notify = notify.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.fetch_all().await {
                    Ok(snapshot) => {
                        Logger::debug_with_component(
                            COMPONENT,
                            &format!(
                                "Loaded {} incomes and {} expenses",
                                snapshot.income.len(),
                                snapshot.expenses.len()
                            ),
                        );
                        view.set(DashboardView::from_snapshot(&snapshot));
                    }
                    Err(e) => report_error(&notify, "Failed to load operations", &e),
                }

                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let submit = {
        let api_client = api_client.clone();
        let amount = amount.clone();
        let description = description.clone();
        let submitting = submitting.clone();
        let notify = notify.clone();
        let refresh = refresh.clone();

        use_callback(
            (*kind, (*amount).clone(), (*description).clone()),
            move |_: (), (kind, amount_input, description_input)| {
                let request = match validate_new_operation(*kind, amount_input, description_input) {
                    Ok(request) => request,
                    Err(e) => {
                        report_error(&notify, "Rejected operation form", &e);
                        return;
                    }
                };

                let api_client = api_client.clone();
                let amount = amount.clone();
                let description = description.clone();
                let submitting = submitting.clone();
                let notify = notify.clone();
                let refresh = refresh.clone();

                spawn_local(async move {
                    submitting.set(true);

                    match api_client.create(request).await {
                        Ok(()) => {
                            amount.set(String::new());
                            description.set(String::new());
                            notify.emit(Notification::success("Operation added"));
                            refresh.emit(());
                        }
                        Err(e) => report_error(&notify, "Failed to create operation", &e),
                    }

                    submitting.set(false);
                });
            },
        )
    };

    let delete = {
        let api_client = api_client.clone();
        let notify = notify.clone();
        let refresh = refresh.clone();

        use_callback((), move |row: OperationRow, _| {
            if !gloo::dialogs::confirm("Are you sure you want to delete this operation?") {
                return;
            }

            let api_client = api_client.clone();
            let notify = notify.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match api_client.remove(&row.id).await {
                    Ok(()) => {
                        Logger::info_with_component(COMPONENT, &format!("Deleted {} {}", row.kind, row.id));
                        refresh.emit(());
                    }
                    Err(e) => report_error(&notify, "Failed to delete operation", &e),
                }
            });
        })
    };

    let edit = {
        let api_client = api_client.clone();
        let notify = notify.clone();
        let refresh = refresh.clone();

        use_callback((), move |row: OperationRow, _| {
            let amount_input = gloo::dialogs::prompt("New amount:", Some(row.amount.as_str()));
            let label_input = gloo::dialogs::prompt(
                &format!("New {}:", row.kind.label_name()),
                Some(row.label.as_str()),
            );

            let Some(request) = build_update(row.kind, amount_input.as_deref(), label_input.as_deref()) else {
                return;
            };

            let api_client = api_client.clone();
            let notify = notify.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match api_client.update(&row.id, request).await {
                    Ok(()) => refresh.emit(()),
                    Err(e) => report_error(&notify, "Failed to update operation", &e),
                }
            });
        })
    };

    let on_kind_change = {
        let kind = kind.clone();
        use_callback((), move |e: Event, _| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(selected) = OperationKind::from_wire(&select.value()) {
                kind.set(selected);
            }
        })
    };

    let on_amount_change = {
        let amount = amount.clone();
        use_callback((), move |e: Event, _| {
            let input: HtmlInputElement = e.target_unchecked_into();
            amount.set(input.value());
        })
    };

    let on_description_change = {
        let description = description.clone();
        use_callback((), move |e: Event, _| {
            let input: HtmlInputElement = e.target_unchecked_into();
            description.set(input.value());
        })
    };

    UseDashboardResult {
        state: DashboardState {
            view: (*view).clone(),
            loading: *loading,
            kind: *kind,
            amount: (*amount).clone(),
            description: (*description).clone(),
            submitting: *submitting,
            notification: (*notification).clone(),
        },
        actions: DashboardActions {
            refresh,
            submit,
            delete,
            edit,
            on_kind_change,
            on_amount_change,
            on_description_change,
            dismiss_notification,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notification_uses_user_message() {
        let network = Notification::error(&DashboardError::Network("connection refused".to_string()));
        assert_eq!(network.level, NotificationLevel::Error);
        assert_eq!(network.message, "Error while loading data");

        let unreachable = Notification::error(&DashboardError::Unreachable("Failed to delete operation".to_string()));
        assert_eq!(unreachable.level, NotificationLevel::Error);
        assert_eq!(unreachable.message, "Could not reach the server, please try again");

        let request = Notification::error(&DashboardError::Request("Invalid amount".to_string()));
        assert_eq!(request.message, "Invalid amount");

        let validation = Notification::error(&DashboardError::Validation("Please fill in all fields".to_string()));
        assert_eq!(validation.message, "Please fill in all fields");
    }

    #[test]
    fn test_success_notification() {
        let notification = Notification::success("Operation added");

        assert_eq!(notification.level, NotificationLevel::Success);
        assert_eq!(notification.message, "Operation added");
    }
}
