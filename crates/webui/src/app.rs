use crate::{
    api::ApiClient,
    components::{
        crud_page::CrudPage,
        dashboard_page::DashboardPage,
        layout::Layout,
        login_page::LoginPage,
        notification::NotificationProvider,
        projects_grid::ProjectsGrid,
        projet_detail_page::ProjetDetailPage,
        projets_page::ProjetsPage,
        unauthorized::Unauthorized,
        use_auth,
    },
    config::ApiConfig,
    model::{Agence, Commune, Departement, Entreprise, Exercice, Lot, Role, Todo, Visite},
    nav::{Access, Guard, check},
    state::{AuthAction, AuthState, auth},
};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/unauthorized")]
    Unauthorized,
    #[at("/dashboard")]
    Dashboard,
    #[at("/dashboard/national")]
    NationalDashboard,
    #[at("/dashboard/regional")]
    RegionalDashboard,
    #[at("/projects/grid")]
    ProjectsGrid,
    #[at("/feicom/projets")]
    Projets,
    #[at("/feicom/projets/:id/detail")]
    ProjetDetail { id: i64 },
    #[at("/feicom/visites")]
    Visites,
    #[at("/departements")]
    Departements,
    #[at("/agences")]
    Agences,
    #[at("/communes")]
    Communes,
    #[at("/entreprises")]
    Entreprises,
    #[at("/lots")]
    Lots,
    #[at("/todos")]
    Todos,
    #[at("/exercise")]
    Exercices,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Unauthorized => Access::Public,
            Route::NationalDashboard | Route::Departements | Route::Agences => {
                Access::Role(Role::National)
            }
            Route::RegionalDashboard => Access::Role(Role::Regional),
            Route::Home
            | Route::NotFound
            | Route::Dashboard
            | Route::ProjectsGrid
            | Route::Projets
            | Route::ProjetDetail { .. }
            | Route::Visites
            | Route::Communes
            | Route::Entreprises
            | Route::Lots
            | Route::Todos
            | Route::Exercices => Access::Private,
        }
    }

    fn render(route: Route) -> Html {
        let page = match &route {
            Route::Home | Route::NotFound => return html! { <Redirect<Route> to={Route::Dashboard} /> },
            Route::Login => return html! { <LoginPage /> },
            Route::Unauthorized => html! { <Unauthorized /> },
            Route::Dashboard => html! { <DashboardPage /> },
            Route::NationalDashboard => html! { <DashboardPage role={Role::National} /> },
            Route::RegionalDashboard => html! { <DashboardPage role={Role::Regional} /> },
            Route::ProjectsGrid => html! { <ProjectsGrid /> },
            Route::Projets => html! { <ProjetsPage /> },
            Route::ProjetDetail { id } => html! { <ProjetDetailPage id={*id} /> },
            Route::Visites => html! { <CrudPage<Visite> /> },
            Route::Departements => html! { <CrudPage<Departement> /> },
            Route::Agences => html! { <CrudPage<Agence> /> },
            Route::Communes => html! { <CrudPage<Commune> /> },
            Route::Entreprises => html! { <CrudPage<Entreprise> /> },
            Route::Lots => html! { <CrudPage<Lot> /> },
            Route::Todos => html! { <CrudPage<Todo> /> },
            Route::Exercices => html! { <CrudPage<Exercice> /> },
        };
        html! { <Guarded access={route.access()}>{ page }</Guarded> }
    }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    access: Access,
    children: Html,
}

/// Renders the page inside the layout, or redirects when the session does not allow it.
#[function_component(Guarded)]
fn guarded(GuardedProps { access, children }: &GuardedProps) -> Html {
    let auth = use_auth();
    match check(*access, auth.user()) {
        Guard::Allow => html! { <Layout>{ children.clone() }</Layout> },
        Guard::RedirectLogin => html! { <Redirect<Route> to={Route::Login} /> },
        Guard::RedirectUnauthorized => html! { <Redirect<Route> to={Route::Unauthorized} /> },
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ApiConfig,
}

#[function_component(App)]
pub fn app(AppProps { config }: &AppProps) -> Html {
    let session = use_reducer(|| AuthState {
        session: auth::restore(),
    });
    use_effect_with(session.session.clone(), |stored| auth::persist(stored.as_ref()));

    // Rebuilt whenever the token changes; a 401 on any request signs the user out.
    let api = {
        let dispatcher = session.dispatcher();
        use_memo(
            (config.clone(), session.token().map(str::to_string)),
            move |(config, token)| {
                ApiClient::new(config.clone())
                    .with_token(token.clone())
                    .on_unauthorized(move || dispatcher.dispatch(AuthAction::LoggedOut))
            },
        )
    };

    html! {
        <ContextProvider<ApiClient> context={(*api).clone()}>
            <ContextProvider<UseReducerHandle<AuthState>> context={session}>
                <NotificationProvider>
                    <BrowserRouter>
                        <Switch<Route> render={Route::render} />
                    </BrowserRouter>
                </NotificationProvider>
            </ContextProvider<UseReducerHandle<AuthState>>>
        </ContextProvider<ApiClient>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Home)]
    #[case("/exercise", Route::Exercices)]
    #[case("/feicom/projets/42/detail", Route::ProjetDetail { id: 42 })]
    #[case("/dashboard/regional", Route::RegionalDashboard)]
    fn paths_resolve(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::recognize(path), Some(expected));
    }

    #[test]
    fn detail_path_round_trips() {
        assert_eq!(Route::ProjetDetail { id: 7 }.to_path(), "/feicom/projets/7/detail");
    }

    #[rstest]
    #[case(Route::Login, Access::Public)]
    #[case(Route::Agences, Access::Role(Role::National))]
    #[case(Route::Departements, Access::Role(Role::National))]
    #[case(Route::RegionalDashboard, Access::Role(Role::Regional))]
    #[case(Route::Communes, Access::Private)]
    fn route_access(#[case] route: Route, #[case] expected: Access) {
        assert_eq!(route.access(), expected);
    }
}
