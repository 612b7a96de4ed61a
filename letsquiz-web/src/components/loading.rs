use crate::routes::AppRoute;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    /// Route the guard is still deciding on.
    #[prop_or_default]
    pub pending: Option<AppRoute>,
}

/// Status line for a pending navigation.
pub fn pending_message(pending: Option<&AppRoute>) -> String {
    match pending.and_then(|route| route.meta().title) {
        Some(title) => format!("Opening {title}"),
        None => "Checking your session".to_string(),
    }
}

/// Shown while the guard decides the current navigation.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    let message = pending_message(props.pending.as_ref());

    html! {
        <section class="flex h-full items-center justify-center" role="status" aria-live="polite">
            <div class="card w-80 bg-base-200 shadow-md">
                <div class="card-body gap-3">
                    <h2 class="card-title text-primary">{"LetsQuiz"}</h2>
                    <progress class="progress progress-primary w-full"></progress>
                    <p class="text-sm opacity-70">{message}</p>
                    <ul class="flex flex-col gap-2" aria-hidden="true">
                        <li class="skeleton h-4 w-full"></li>
                        <li class="skeleton h-4 w-3/4"></li>
                        <li class="skeleton h-4 w-1/2"></li>
                    </ul>
                </div>
            </div>
        </section>
    }
}
