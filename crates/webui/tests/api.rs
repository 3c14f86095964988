use assert_matches::assert_matches;
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use webui::{
    api::{ApiClient, ApiError, NETWORK_ERROR, ProjectsQuery},
    config::ApiConfig,
    model::{Agence, Lookup, Role, agence::AgencePayload},
    state::{
        GridAction, Operation, ResourceAction,
        grid::query_projects,
        resource::{self, fetch_all},
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path},
};
use yew::Callback;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new(&server.uri()).unwrap())
}

/// Callback recording every action it receives.
fn recorder<T: 'static>() -> (Callback<T>, Rc<RefCell<Vec<T>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let callback = {
        let seen = seen.clone();
        Callback::from(move |action| seen.borrow_mut().push(action))
    };
    (callback, seen)
}

fn centre() -> serde_json::Value {
    json!({"id": 1, "nom": "Centre", "code": "CE"})
}

#[tokio::test]
async fn login_posts_form_and_normalises_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feicom/api/login/"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("username=admin&password=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "username": "admin",
            "email": "admin@feicom.cm",
            "role": "REGIONAL",
            "agence": "Ouest",
            "agence_id": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client(&server).login("admin", "s3cret").await.unwrap();
    assert_eq!(session.token, "abc123");
    assert_eq!(session.user.role, Some(Role::Regional));
    assert_eq!(session.user.agence_id, Some(4));
}

#[tokio::test]
async fn login_failure_uses_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feicom/api/login/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Identifiants invalides"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).login("admin", "bad").await.unwrap_err();
    assert_matches!(err, ApiError::Server { status: 400, .. });
    assert_eq!(err.message_or("Échec de connexion"), "Identifiants invalides");
}

#[tokio::test]
async fn token_is_sent_and_lists_accept_both_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/agences/"))
        .and(header("authorization", "Token abc123"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([centre()])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/exercices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "results": [{"id": 3, "annee": 2025, "budget": "1500000.00"}]
        })))
        .mount(&server)
        .await;

    let api = client(&server).with_token(Some("abc123".into()));
    let agences = api.list::<Agence>().await.unwrap();
    assert_eq!(agences[0].nom, "Centre");
    let exercices = api.list::<webui::model::Exercice>().await.unwrap();
    assert_eq!(exercices[0].budget, 1_500_000.0);
}

#[tokio::test]
async fn unauthorized_runs_the_logout_hook() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/agences/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid token."})),
        )
        .mount(&server)
        .await;

    let logged_out = Rc::new(RefCell::new(0));
    let api = client(&server).with_token(Some("expired".into())).on_unauthorized({
        let logged_out = logged_out.clone();
        move || *logged_out.borrow_mut() += 1
    });
    let err = api.list::<Agence>().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message().as_deref(), Some("Invalid token."));
    assert_eq!(*logged_out.borrow(), 1);
}

#[tokio::test]
async fn crud_uses_item_paths_and_json_bodies() {
    let server = MockServer::start().await;
    let payload = AgencePayload {
        nom: "Littoral".into(),
        code: "LT".into(),
    };
    Mock::given(method("POST"))
        .and(path("/feicom/api/agences/"))
        .and(body_json(json!({"nom": "Littoral", "code": "LT"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 9, "nom": "Littoral", "code": "LT"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/feicom/api/agences/9/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 9, "nom": "Littoral", "code": "LT"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/agences/9/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 9, "nom": "Littoral", "code": "LT"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/feicom/api/agences/9/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let created = api.create::<Agence>(&payload).await.unwrap();
    assert_eq!(created.id, 9);
    api.update::<Agence>(9, &payload).await.unwrap();
    assert_eq!(api.get::<Agence>(9).await.unwrap().code, "LT");
    api.delete::<Agence>(9).await.unwrap();
}

#[tokio::test]
async fn validation_errors_are_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feicom/api/agences/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": ["Ce champ doit être unique."],
            "nom": ["Ce champ est obligatoire."]
        })))
        .mount(&server)
        .await;

    let (dispatch, seen) = recorder();
    let payload = AgencePayload {
        nom: String::new(),
        code: "CE".into(),
    };
    let message = resource::create::<Agence>(&client(&server), &dispatch, &payload)
        .await
        .unwrap_err();
    assert_eq!(
        message,
        "code: Ce champ doit être unique.; nom: Ce champ est obligatoire."
    );
    assert_matches!(
        seen.borrow().as_slice(),
        [ResourceAction::Failed(Operation::Create, m)] if *m == message
    );
}

#[tokio::test]
async fn network_failure_has_generic_message() {
    let api = ApiClient::new(ApiConfig::new("http://127.0.0.1:9").unwrap());
    let err = api.list::<Agence>().await.unwrap_err();
    assert_matches!(err, ApiError::Transport(_));
    assert_eq!(err.message().as_deref(), Some(NETWORK_ERROR));
}

#[tokio::test]
async fn fetch_reports_start_then_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/agences/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([centre()])))
        .mount(&server)
        .await;

    let (dispatch, seen) = recorder();
    fetch_all::<Agence>(&client(&server), &dispatch).await;
    assert_matches!(
        seen.borrow().as_slice(),
        [ResourceAction::FetchStarted, ResourceAction::Fetched(items)] if items.len() == 1
    );
}

#[tokio::test]
async fn failed_bulk_delete_refetches_then_reports() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/feicom/api/agences/1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/feicom/api/agences/2/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Pas trouvé."})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/agences/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (dispatch, seen) = recorder();
    let result = resource::delete_many::<Agence>(&client(&server), &dispatch, vec![1, 2]).await;
    assert_eq!(result.unwrap_err(), "Pas trouvé.");
    assert_matches!(
        seen.borrow().as_slice(),
        [
            ResourceAction::FetchStarted,
            ResourceAction::Fetched(items),
            ResourceAction::Failed(Operation::DeleteMany, _),
        ] if items.is_empty()
    );
}

#[tokio::test]
async fn bulk_delete_removes_every_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(3)
        .mount(&server)
        .await;

    let (dispatch, seen) = recorder();
    resource::delete_many::<Agence>(&client(&server), &dispatch, vec![4, 5, 6])
        .await
        .unwrap();
    assert_matches!(
        seen.borrow().as_slice(),
        [ResourceAction::DeletedMany(ids)] if *ids == vec![4, 5, 6]
    );
}

#[tokio::test]
async fn grid_query_uses_month_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/filters/projects/3/7/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "libelle": "Marché", "montant_ht": "2500000.00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (dispatch, seen) = recorder();
    let query = ProjectsQuery {
        exercice: 3,
        agence: 7,
        month: Some(5),
    };
    query_projects(&client(&server), Some(query), &dispatch).await;
    assert_matches!(
        seen.borrow().as_slice(),
        [GridAction::Querying, GridAction::Loaded(items)] if items[0].montant_ht == Some(2_500_000.0)
    );
}

#[tokio::test]
async fn grid_without_query_falls_back_to_local_list() {
    let server = MockServer::start().await;
    let (dispatch, seen) = recorder();
    query_projects(&client(&server), None, &dispatch).await;
    assert_matches!(seen.borrow().as_slice(), [GridAction::UseLocal]);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn grid_query_failure_sets_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (dispatch, seen) = recorder();
    let query = ProjectsQuery {
        exercice: 1,
        agence: 1,
        month: None,
    };
    query_projects(&client(&server), Some(query), &dispatch).await;
    assert_matches!(
        seen.borrow().as_slice(),
        [GridAction::Querying, GridAction::Failed(message)] if message == "Erreur chargement filtres"
    );
}

#[tokio::test]
async fn lookups_fetch_each_list_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/exercices/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "annee": 2025, "budget": 10}])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/agences/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([centre()])))
        .expect(1)
        .mount(&server)
        .await;

    let (lookups, failures) = client(&server)
        .lookups(&[Lookup::Exercices, Lookup::Agences, Lookup::Exercices])
        .await;
    assert!(failures.is_empty());
    assert_eq!(lookups.exercices[0].annee, 2025);
    assert_eq!(lookups.agences[0].code, "CE");
    assert!(lookups.communes.is_empty());
}

#[tokio::test]
async fn lookups_keep_the_lists_that_loaded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/exercices/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "annee": 2026, "budget": 10}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/communes/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 5, "nom": "Dschang", "departement": 2}])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/agences/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Interdit"})))
        .mount(&server)
        .await;

    let (lookups, failures) = client(&server)
        .lookups(&[Lookup::Exercices, Lookup::Communes, Lookup::Agences])
        .await;
    assert_eq!(lookups.exercices[0].annee, 2026);
    assert_eq!(lookups.communes[0].nom, "Dschang");
    assert!(lookups.agences.is_empty());
    assert_matches!(
        failures.as_slice(),
        [(Lookup::Agences, err)] if err.message_or("Erreur") == "Interdit"
    );
}

#[tokio::test]
async fn grid_reset_queries_server_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feicom/api/filters/projects/3/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "libelle": "Marché"}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let api = client(&server);
    let (dispatch, seen) = recorder();
    let query = Some(ProjectsQuery {
        exercice: 3,
        agence: 7,
        month: None,
    });
    query_projects(&api, query, &dispatch).await;
    query_projects(&api, query, &dispatch).await;
    assert_matches!(
        seen.borrow().as_slice(),
        [
            GridAction::Querying,
            GridAction::Loaded(_),
            GridAction::Querying,
            GridAction::Loaded(items),
        ] if items[0].id == 11
    );
}
