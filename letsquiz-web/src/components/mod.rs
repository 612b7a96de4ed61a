pub mod loading;
pub mod route_view;
