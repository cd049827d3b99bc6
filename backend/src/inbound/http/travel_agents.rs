//! Travel agent HTTP handlers.
//!
//! A travel agent record holds raw ids of a customer, hotel, flight and
//! taxi. None of them are checked against stored records.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::TravelAgentFilter;
use crate::domain::{TravelAgent, TravelAgentDraft, TravelAgentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Resource, reconcile_body_id};

/// Travel agent payload accepted by create and replace. Absent ids are 0.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelAgentRequest {
    /// Required on replace; ignored on create.
    pub id: Option<i64>,
    #[serde(default)]
    pub customer_id: i64,
    #[serde(default)]
    pub hotel_id: i64,
    #[serde(default)]
    pub flight_id: i64,
    #[serde(default)]
    pub taxi_id: i64,
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-01")]
    pub booking_date: Option<NaiveDate>,
}

impl From<TravelAgentRequest> for TravelAgentDraft {
    fn from(value: TravelAgentRequest) -> Self {
        Self {
            customer_id: value.customer_id,
            hotel_id: value.hotel_id,
            flight_id: value.flight_id,
            taxi_id: value.taxi_id,
            booking_date: value.booking_date,
        }
    }
}

/// Stored travel agent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelAgentResponse {
    pub id: i64,
    pub customer_id: i64,
    pub hotel_id: i64,
    pub flight_id: i64,
    pub taxi_id: i64,
    #[schema(value_type = String, format = Date)]
    pub booking_date: NaiveDate,
}

impl From<TravelAgent> for TravelAgentResponse {
    fn from(value: TravelAgent) -> Self {
        Self {
            id: value.id.get(),
            customer_id: value.customer_id,
            hotel_id: value.hotel_id,
            flight_id: value.flight_id,
            taxi_id: value.taxi_id,
            booking_date: value.booking_date,
        }
    }
}

/// Optional customer id filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TravelAgentListQuery {
    /// Raw customer id.
    pub customer_id: Option<i64>,
}

/// List travel agent records ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/travelAgents",
    params(TravelAgentListQuery),
    responses(
        (status = 200, description = "Travel agent records", body = [TravelAgentResponse]),
        (status = 400, description = "Unparseable customer id", body = ErrorSchema)
    ),
    tags = ["travel agents"],
    operation_id = "listTravelAgents"
)]
#[get("/travelAgents")]
pub async fn list_travel_agents(
    state: web::Data<HttpState>,
    query: web::Query<TravelAgentListQuery>,
) -> ApiResult<web::Json<Vec<TravelAgentResponse>>> {
    let agents = state
        .travel_agents_query
        .list(TravelAgentFilter {
            customer_id: query.into_inner().customer_id,
        })
        .await?;
    Ok(web::Json(
        agents.into_iter().map(TravelAgentResponse::from).collect(),
    ))
}

/// Fetch a travel agent record by id.
#[utoipa::path(
    get,
    path = "/api/v1/travelAgents/{id}",
    params(("id" = i64, Path, description = "Travel agent id")),
    responses(
        (status = 200, description = "Travel agent record", body = TravelAgentResponse),
        (status = 404, description = "No such record", body = ErrorSchema)
    ),
    tags = ["travel agents"],
    operation_id = "getTravelAgent"
)]
#[get("/travelAgents/{id:\\d+}")]
pub async fn get_travel_agent(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TravelAgentResponse>> {
    let agent = state
        .travel_agents_query
        .get(TravelAgentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(agent.into()))
}

/// Create a travel agent record.
#[utoipa::path(
    post,
    path = "/api/v1/travelAgents",
    request_body = TravelAgentRequest,
    responses(
        (status = 201, description = "Travel agent record created", body = TravelAgentResponse),
        (status = 400, description = "Invalid record", body = ErrorSchema)
    ),
    tags = ["travel agents"],
    operation_id = "createTravelAgent"
)]
#[post("/travelAgents")]
pub async fn create_travel_agent(
    state: web::Data<HttpState>,
    payload: web::Json<TravelAgentRequest>,
) -> ApiResult<HttpResponse> {
    let agent = state
        .travel_agents
        .create(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(TravelAgentResponse::from(agent)))
}

/// Replace a travel agent record.
#[utoipa::path(
    put,
    path = "/api/v1/travelAgents/{id}",
    params(("id" = i64, Path, description = "Travel agent id")),
    request_body = TravelAgentRequest,
    responses(
        (status = 200, description = "Travel agent record replaced", body = TravelAgentResponse),
        (status = 400, description = "Invalid record", body = ErrorSchema),
        (status = 404, description = "No such record", body = ErrorSchema),
        (status = 409, description = "Id mismatch", body = ErrorSchema)
    ),
    tags = ["travel agents"],
    operation_id = "updateTravelAgent"
)]
#[put("/travelAgents/{id:\\d+}")]
pub async fn update_travel_agent(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<TravelAgentRequest>,
) -> ApiResult<web::Json<TravelAgentResponse>> {
    let payload = payload.into_inner();
    let id = TravelAgentId::new(reconcile_body_id(
        Resource::TRAVEL_AGENT,
        path.into_inner(),
        payload.id,
    )?);
    state.travel_agents_query.get(id).await?;
    let agent = state.travel_agents.update(id, payload.into()).await?;
    Ok(web::Json(agent.into()))
}

/// Delete a travel agent record.
#[utoipa::path(
    delete,
    path = "/api/v1/travelAgents/{id}",
    params(("id" = i64, Path, description = "Travel agent id")),
    responses(
        (status = 204, description = "Travel agent record deleted"),
        (status = 404, description = "No such record", body = ErrorSchema)
    ),
    tags = ["travel agents"],
    operation_id = "deleteTravelAgent"
)]
#[delete("/travelAgents/{id:\\d+}")]
pub async fn delete_travel_agent(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .travel_agents
        .delete(TravelAgentId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorCode};
    use crate::inbound::http::test_utils::{
        create, delete, get, memory_state, post_json, put_json, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[actix_web::test]
    async fn absent_ids_default_to_zero() {
        let (_, state) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let res = post_json(
            &app,
            "/api/v1/travelAgents",
            &json!({ "customerId": 3, "bookingDate": "2024-05-01" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let agent: TravelAgentResponse = actix_test::read_body_json(res).await;
        assert_eq!((agent.customer_id, agent.hotel_id, agent.taxi_id), (3, 0, 0));
    }

    #[rstest]
    #[actix_web::test]
    async fn list_filters_by_customer_id() {
        let (_, state) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        for customer in [1, 2, 1] {
            create(
                &app,
                "/api/v1/travelAgents",
                &json!({ "customerId": customer, "bookingDate": "2024-05-01" }),
            )
            .await;
        }

        let res = get(&app, "/api/v1/travelAgents?customerId=1").await;
        let agents: Vec<TravelAgentResponse> = actix_test::read_body_json(res).await;
        assert_eq!(agents.len(), 2);

        let bad = get(&app, "/api/v1/travelAgents?customerId=one").await;
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_booking_date_is_rejected() {
        let (_, state) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let res = post_json(&app, "/api/v1/travelAgents", &json!({ "hotelId": 4 })).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::ValidationFailed);
    }

    #[rstest]
    #[actix_web::test]
    async fn replace_and_delete() {
        let (_, state) = memory_state();
        let app = actix_test::init_service(test_app(state)).await;
        let id = create(
            &app,
            "/api/v1/travelAgents",
            &json!({ "customerId": 1, "bookingDate": "2024-05-01" }),
        )
        .await;

        let missing_id = put_json(
            &app,
            &format!("/api/v1/travelAgents/{id}"),
            &json!({ "taxiId": 9, "bookingDate": "2024-05-01" }),
        )
        .await;
        assert_eq!(missing_id.status(), StatusCode::BAD_REQUEST);

        let res = put_json(
            &app,
            &format!("/api/v1/travelAgents/{id}"),
            &json!({ "id": id, "taxiId": 9, "bookingDate": "2024-05-01" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let agent: TravelAgentResponse = actix_test::read_body_json(res).await;
        assert_eq!(agent.taxi_id, 9);

        assert_eq!(
            delete(&app, &format!("/api/v1/travelAgents/{id}")).await.status(),
            StatusCode::NO_CONTENT
        );
        let gone = get(&app, &format!("/api/v1/travelAgents/{id}")).await;
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }
}
