//! Static dimension metadata.

use axum::Json;
use serde::Serialize;
use tracker_core::{Dimension, DimensionInfo};

#[derive(Serialize)]
pub struct DimensionView {
    pub key: Dimension,
    #[serde(flatten)]
    pub info: &'static DimensionInfo,
}

/// All eight dimensions in display order.
pub async fn list_dimensions() -> Json<Vec<DimensionView>> {
    Json(
        Dimension::ALL
            .into_iter()
            .map(|key| DimensionView {
                key,
                info: key.info(),
            })
            .collect(),
    )
}
