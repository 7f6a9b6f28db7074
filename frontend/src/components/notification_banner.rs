use yew::prelude::*;

use crate::hooks::{Notification, NotificationLevel};

#[derive(Properties, PartialEq)]
pub struct NotificationBannerProps {
    pub notification: Option<Notification>,
    pub on_dismiss: Callback<()>,
}

#[function_component(NotificationBanner)]
pub fn notification_banner(props: &NotificationBannerProps) -> Html {
    let Some(notification) = &props.notification else {
        return html! {};
    };

    let class = match notification.level {
        NotificationLevel::Success => "notification success",
        NotificationLevel::Error => "notification error",
    };
    let onclick = props.on_dismiss.reform(|_: MouseEvent| ());

    html! {
        <div {class} role="status">
            <span class="notification-message">{&notification.message}</span>
            <button class="notification-close" {onclick}>{"×"}</button>
        </div>
    }
}
