use crate::routes::AppRoute;
use crate::session::SessionState;
use yew::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: AppRoute,
}

/// Frame rendered for an allowed route: its title and the signed-in role.
#[function_component(RouteView)]
pub fn route_view(props: &RouteViewProps) -> Html {
    let role = use_selector(|state: &SessionState| state.role().map(ToString::to_string));
    let meta = props.route.meta();

    html! {
        <main class="min-h-screen bg-base-100 p-4" data-route={meta.name}>
            if let Some(title) = meta.title {
                <h1 class="text-2xl font-semibold">{title}</h1>
            }
            if let Some(role) = &*role {
                <span class="badge badge-outline">{role.clone()}</span>
            }
        </main>
    }
}
