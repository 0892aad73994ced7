use rocket::{State, get, post, put, delete, http::Status, serde::json::{self, Json}};
use tracing::{debug, error, info, warn, instrument, Level};
use shared::models::*;
use crate::{
    error::ApiError,
    fairings::RequestStats,
    store::{StoreError, VoterStore},
    utils::parse_id,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
    pub store: VoterStore,
    pub stats: RequestStats,
}

impl AppState {
    pub fn new(store: VoterStore) -> Self {
        Self {
            store,
            stats: RequestStats::default(),
        }
    }
}

/// Missing records are routine; only backend and decode failures are errors.
pub(crate) fn severity(e: &StoreError) -> Level {
    match e {
        StoreError::NotFound(_) | StoreError::PollNotFound { .. } => Level::DEBUG,
        StoreError::AlreadyExists(_) => Level::WARN,
        _ => Level::ERROR,
    }
}

fn logged<T>(what: &str, result: Result<T, StoreError>) -> Result<T, ApiError> {
    result.map_err(|e| {
        let level = severity(&e);
        if level == Level::DEBUG {
            debug!("{}: {}", what, e);
        } else if level == Level::WARN {
            warn!("Error {}: {}", what, e);
        } else {
            error!("Error {}: {}", what, e);
        }
        ApiError::from(e)
    })
}

/// Unwraps a JSON body, turning syntax and shape errors into a 400.
fn body<T>(data: Result<Json<T>, json::Error<'_>>) -> Result<T, ApiError> {
    data.map(Json::into_inner).map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::InvalidBody(e.to_string())
    })
}

#[get("/voters")]
pub async fn list_voters(state: &State<AppState>) -> Result<Json<Vec<Voter>>, ApiError> {
    logged("listing voters", state.store.list_voters().await).map(Json)
}

#[instrument(skip(state, voter))]
#[post("/voters", format = "json", data = "<voter>")]
pub async fn add_voter(
    state: &State<AppState>,
    voter: Result<Json<Voter>, json::Error<'_>>,
) -> Result<Json<Voter>, ApiError> {
    let voter = body(voter)?;
    logged("adding voter", state.store.add_voter(&voter).await)?;
    Ok(Json(voter))
}

#[instrument(skip(state))]
#[delete("/voters")]
pub async fn delete_all_voters(state: &State<AppState>) -> Result<String, ApiError> {
    let count = logged("deleting all voters", state.store.delete_all().await)?;
    info!("Deleted {} voters", count);
    Ok(format!("Deleted {} voters", count))
}

#[get("/voters/<id>")]
pub async fn get_voter(state: &State<AppState>, id: &str) -> Result<Json<Voter>, ApiError> {
    let id = parse_id(id)?;
    logged("getting voter", state.store.get_voter(id).await).map(Json)
}

#[instrument(skip(state, voter))]
#[put("/voters/<id>", format = "json", data = "<voter>")]
pub async fn update_voter(
    state: &State<AppState>,
    id: &str,
    voter: Result<Json<Voter>, json::Error<'_>>,
) -> Result<Json<Voter>, ApiError> {
    let id = parse_id(id)?;
    let voter = body(voter)?;
    logged("updating voter", state.store.update_voter(id, voter).await).map(Json)
}

#[instrument(skip(state))]
#[delete("/voters/<id>")]
pub async fn delete_voter(state: &State<AppState>, id: &str) -> Result<&'static str, ApiError> {
    let id = parse_id(id)?;
    logged("deleting voter", state.store.delete_voter(id).await)?;
    Ok("Delete OK")
}

#[get("/voters/<id>/polls")]
pub async fn get_voter_polls(state: &State<AppState>, id: &str) -> Result<Json<Vec<VoteRecord>>, ApiError> {
    let id = parse_id(id)?;
    logged("getting voter polls", state.store.voter_polls(id).await).map(Json)
}

#[instrument(skip(state, record))]
#[post("/voters/<id>/polls", format = "json", data = "<record>")]
pub async fn add_voter_poll(
    state: &State<AppState>,
    id: &str,
    record: Result<Json<VoteRecord>, json::Error<'_>>,
) -> Result<Json<VoteRecord>, ApiError> {
    let id = parse_id(id)?;
    let record = body(record)?;
    logged("adding voter poll", state.store.add_voter_poll(id, record.clone()).await)?;
    Ok(Json(record))
}

#[get("/voters/<id>/polls/<poll_id>")]
pub async fn get_voter_poll(state: &State<AppState>, id: &str, poll_id: &str) -> Result<Json<VoteRecord>, ApiError> {
    let (id, poll_id) = (parse_id(id)?, parse_id(poll_id)?);
    logged("getting voter poll", state.store.voter_poll(id, poll_id).await).map(Json)
}

#[instrument(skip(state, record))]
#[put("/voters/<id>/polls/<poll_id>", format = "json", data = "<record>")]
pub async fn update_voter_poll(
    state: &State<AppState>,
    id: &str,
    poll_id: &str,
    record: Result<Json<VoteRecord>, json::Error<'_>>,
) -> Result<Json<VoteRecord>, ApiError> {
    let (id, poll_id) = (parse_id(id)?, parse_id(poll_id)?);
    let record = body(record)?;
    logged("updating voter poll", state.store.update_voter_poll(id, poll_id, record.clone()).await)?;
    Ok(Json(record))
}

#[instrument(skip(state))]
#[delete("/voters/<id>/polls/<poll_id>")]
pub async fn delete_voter_poll(state: &State<AppState>, id: &str, poll_id: &str) -> Result<&'static str, ApiError> {
    let (id, poll_id) = (parse_id(id)?, parse_id(poll_id)?);
    logged("deleting voter poll", state.store.delete_voter_poll(id, poll_id).await)?;
    Ok("Delete OK")
}

#[get("/voters/health")]
pub async fn health(state: &State<AppState>) -> Json<HealthReport> {
    let status = match state.store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!("Health check ping failed: {}", e);
            "degraded"
        }
    };

    Json(HealthReport {
        status: status.into(),
        version: VERSION.into(),
        backend: state.store.backend_name().into(),
        uptime: state.stats.uptime_secs(),
        users_processed: state.stats.requests(),
        errors_encountered: state.stats.errors(),
    })
}

#[get("/crash")]
pub fn crash() -> Status {
    panic!("Simulating an unexpected crash")
}

#[get("/crash2")]
pub fn crash2() -> String {
    let divisor = std::hint::black_box(0u64);
    format!("{}", 1 / divisor)
}

#[get("/crash3")]
pub fn crash3() -> Status {
    warn!("Exiting on request");
    std::process::exit(10)
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
