use shared::models::UserRole;
use strum::EnumIter;
use yew_router::prelude::*;

/// The application routes.
///
/// Static segments win over parameters, so `/quizzes/create` never reaches
/// the `Quiz` route.
#[derive(Debug, Clone, PartialEq, Eq, Routable, EnumIter)]
pub enum AppRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/user")]
    User,
    #[at("/dashboard")]
    Dashboard,
    #[at("/quizzes")]
    Quizzes,
    #[at("/quizzes/:id")]
    Quiz { id: String },
    #[at("/user/edit")]
    UserEdit,
    #[at("/leaderboard")]
    Leaderboard,
    #[at("/quizzes/create")]
    QuizCreation,
    #[at("/quizzes/:id/edit")]
    QuizEdit { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Static metadata attached to a route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub name: &'static str,
    pub title: Option<&'static str>,
    /// Anonymous visitors are sent to the login page.
    pub auth_required: bool,
    /// Signed-in visitors are sent to their profile.
    pub auth_forbidden: bool,
    /// Visitors with any other role are sent home.
    pub role: Option<UserRole>,
}

impl RouteMeta {
    fn open(name: &'static str, title: Option<&'static str>) -> Self {
        Self {
            name,
            title,
            auth_required: false,
            auth_forbidden: false,
            role: None,
        }
    }

    fn guest_only(name: &'static str, title: &'static str) -> Self {
        Self {
            auth_forbidden: true,
            ..Self::open(name, Some(title))
        }
    }

    fn members(name: &'static str, title: &'static str) -> Self {
        Self {
            auth_required: true,
            ..Self::open(name, Some(title))
        }
    }

    fn teachers(name: &'static str, title: &'static str) -> Self {
        Self {
            role: Some(UserRole::Teacher),
            ..Self::members(name, title)
        }
    }
}

impl AppRoute {
    /// Metadata consulted by the navigation guard.
    pub fn meta(&self) -> RouteMeta {
        match self {
            Self::Home => RouteMeta::open("home", Some("LetsQuiz")),
            Self::Login => RouteMeta::guest_only("login", "Login"),
            Self::Register => RouteMeta::guest_only("register", "Register"),
            Self::User => RouteMeta::members("user", "User profile"),
            Self::Dashboard => RouteMeta::members("dashboard", "Dashboard"),
            Self::Quizzes => RouteMeta::members("quizzes", "Quizzes"),
            Self::Quiz { .. } => RouteMeta::open("quiz", None),
            Self::UserEdit => RouteMeta::members("user-edit", "Edit Profile"),
            Self::Leaderboard => RouteMeta::open("Leaderboard", Some("Leaderboard - LetsQuiz")),
            Self::QuizCreation => RouteMeta::teachers("QuizCreation", "Create Quiz"),
            Self::QuizEdit { .. } => RouteMeta::teachers("QuizEdit", "Edit Quiz"),
            Self::NotFound => RouteMeta::open("not-found", None),
        }
    }

    pub fn name(&self) -> &'static str {
        self.meta().name
    }

    /// Match a browser path, falling back to [`AppRoute::NotFound`].
    pub fn resolve(path: &str) -> Self {
        Self::recognize(path)
            .or_else(Self::not_found_route)
            .unwrap_or(Self::NotFound)
    }
}
