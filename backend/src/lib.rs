pub mod catchers;
pub mod config;
pub mod document;
pub mod error;
pub mod fairings;
pub mod keys;
pub mod memory;
pub mod redis_store;
pub mod routes;
pub mod store;
pub mod utils;
pub use shared::{models::*, error::{Error, ErrorCode, ErrorResponse}};

use rocket::{routes, catchers, Build, Rocket};

use crate::catchers::{bad_request, internal_error, not_found};
use crate::fairings::{RequestCounter, CORS};
use crate::routes::*;
use crate::store::VoterStore;

/// Mount the voter API over an already constructed store.
pub fn build_rocket(rocket: Rocket<Build>, store: VoterStore) -> Rocket<Build> {
    rocket
        .attach(CORS)
        .attach(RequestCounter)
        .manage(AppState::new(store))
        .mount(
            "/",
            routes![
                list_voters,
                add_voter,
                delete_all_voters,
                get_voter,
                update_voter,
                delete_voter,
                get_voter_polls,
                add_voter_poll,
                get_voter_poll,
                update_voter_poll,
                delete_voter_poll,
                health,
                crash,
                crash2,
                crash3,
                all_options
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                internal_error
            ],
        )
}
