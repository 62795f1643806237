pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod state;

pub use state::ApiState;

use axum::Router;
use axum::routing::get;

use handlers::contents::{
    create_content, delete_content, get_content, list_contents, update_content,
};
use handlers::sums::show_sums;

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/contents", get(list_contents).post(create_content))
        .route(
            "/contents/{slug}",
            get(get_content).patch(update_content).delete(delete_content),
        )
        .route("/sums/{n}", get(show_sums))
        .with_state(state)
}
