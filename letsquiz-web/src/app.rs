use crate::api::QuizApiClient;
use crate::components::{loading::Loading, route_view::RouteView};
use crate::guard;
use crate::routes::AppRoute;
use crate::session::{SessionState, SessionStore};
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_effect_with, use_state};
use yew_router::prelude::*;
use yewdux::YewduxRoot;
use yewdux::prelude::use_dispatch;

/// Root component. The yewdux root owns the session for this page load.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <YewduxRoot>
            <BrowserRouter>
                <GuardedSwitch />
            </BrowserRouter>
        </YewduxRoot>
    }
}

/// Renders the current route once the guard has allowed it.
#[function_component(GuardedSwitch)]
fn guarded_switch() -> Html {
    let route = use_route::<AppRoute>().unwrap_or(AppRoute::NotFound);
    let navigator = use_navigator();
    let dispatch = use_dispatch::<SessionState>();
    let allowed = use_state(|| None::<AppRoute>);

    {
        let allowed = allowed.clone();
        use_effect_with(route.clone(), move |route| {
            let route = route.clone();
            spawn_local(async move {
                let api = match QuizApiClient::shared() {
                    Ok(api) => api,
                    Err(err) => {
                        log::error!("cannot reach the LetsQuiz API: {err}");
                        return;
                    }
                };
                let session = SessionStore::new(api, dispatch);

                match guard::navigate(&session, route).await {
                    Ok(navigation) if navigation.was_redirected() => {
                        if let Some(navigator) = navigator {
                            navigator.replace(&navigation.resolved);
                        }
                    }
                    Ok(navigation) => {
                        guard::after_each(&navigation);
                        allowed.set(Some(navigation.resolved));
                    }
                    Err(err) => log::error!("navigation aborted: {err}"),
                }
            });
            || ()
        });
    }

    match &*allowed {
        Some(current) if *current == route => html! { <RouteView route={current.clone()} /> },
        _ => html! { <Loading pending={Some(route)} /> },
    }
}
