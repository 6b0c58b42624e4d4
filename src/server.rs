use std::path::Path as FsPath;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::atomspace::{AtomFilter, AtomSpace};
use crate::construct::{AtomType, Handle};
use crate::error::{AtomSpaceError, Result};
use crate::mapper::{
    AtomFields, CreateAtomRequest, UpdateAtomRequest, marshal, parse_attention_value,
    parse_truth_value,
};

#[derive(Clone)]
pub struct AppState {
    pub space: Arc<dyn AtomSpace>,
}

#[derive(Serialize)]
pub struct AtomResponse {
    pub atoms: AtomFields,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct DeleteAtomResponse {
    pub handle: Handle,
    pub success: bool,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub result: DeleteAtomResponse,
}

#[derive(Serialize)]
pub struct AtomListing {
    pub complete: bool,
    pub skipped: bool,
    pub total: usize,
    pub atoms: Vec<AtomFields>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub result: AtomListing,
}

#[derive(Serialize)]
pub struct TypesResponse {
    pub types: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub atom_type: Option<String>,
    pub name: Option<String>,
    pub stimin: Option<i16>,
    pub stimax: Option<i16>,
    #[serde(rename = "tvStrengthMin")]
    pub tv_strength_min: Option<f64>,
    #[serde(rename = "tvConfidenceMin")]
    pub tv_confidence_min: Option<f64>,
    #[serde(rename = "tvCountMin")]
    pub tv_count_min: Option<f64>,
}

impl ListQuery {
    fn filter(self) -> Result<AtomFilter> {
        let atom_type = self
            .atom_type
            .as_deref()
            .map(str::parse::<AtomType>)
            .transpose()?;
        Ok(AtomFilter {
            atom_type,
            name: self.name,
            sti_min: self.stimin,
            sti_max: self.stimax,
            tv_strength_min: self.tv_strength_min,
            tv_confidence_min: self.tv_confidence_min,
            tv_count_min: self.tv_count_min,
        })
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct DeleteQuery {
    #[serde(default)]
    pub recursive: bool,
}

impl IntoResponse for AtomSpaceError {
    fn into_response(self) -> Response {
        let status = match self {
            AtomSpaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            AtomSpaceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = format!("{self}");
        warn!(%msg, code=%status.as_u16(), "request failed");
        (status, Json(ErrorResponse { error: msg })).into_response()
    }
}

pub fn router(space: Arc<dyn AtomSpace>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    Router::new()
        .route("/api/v1/atoms", get(list_atoms).post(create_atom))
        .route("/api/v1/atoms/:id", get(get_atom).put(update_atom).delete(delete_atom))
        .route("/api/v1/types", get(list_types))
        .with_state(AppState { space })
        .layer(cors)
}

fn handle_from(path: std::result::Result<Path<Handle>, PathRejection>) -> Result<Handle> {
    path.map(|Path(handle)| handle)
        .map_err(|_| AtomSpaceError::bad_request("Invalid handle"))
}

fn fetch(space: &dyn AtomSpace, handle: Handle) -> Result<Json<AtomResponse>> {
    let atom = space.get(handle)?;
    Ok(Json(AtomResponse { atoms: marshal(&atom) }))
}

/// GET /api/v1/atoms/:id
async fn get_atom(
    State(state): State<AppState>,
    path: std::result::Result<Path<Handle>, PathRejection>,
) -> Result<Json<AtomResponse>> {
    let handle = handle_from(path)?;
    fetch(state.space.as_ref(), handle)
}

/// PUT /api/v1/atoms/:id
async fn update_atom(
    State(state): State<AppState>,
    path: std::result::Result<Path<Handle>, PathRejection>,
    body: std::result::Result<Json<UpdateAtomRequest>, JsonRejection>,
) -> Result<Json<AtomResponse>> {
    let handle = handle_from(path)?;
    let Json(request) = body.map_err(|e| AtomSpaceError::bad_request(e.body_text()))?;
    if request.truthvalue.is_none() && request.attentionvalue.is_none() {
        return Err(AtomSpaceError::bad_request(
            "Invalid request: you must include a truthvalue or attentionvalue parameter",
        ));
    }
    let space = state.space.as_ref();
    if !space.contains(handle)? {
        return Err(AtomSpaceError::NotFound { handle });
    }
    // parse everything before touching the atom so a bad request changes nothing
    let tv = request.truthvalue.as_ref().map(parse_truth_value).transpose()?;
    if let Some(tv) = tv {
        space.set_tv(handle, tv)?;
        info!(handle, %tv, "truth value updated");
    }
    if let Some(av) = &request.attentionvalue {
        let (sti, lti, vlti) = parse_attention_value(av);
        space.set_av(handle, sti, lti, vlti)?;
        info!(handle, ?sti, ?lti, ?vlti, "attention value updated");
    }
    fetch(space, handle)
}

/// DELETE /api/v1/atoms/:id
async fn delete_atom(
    State(state): State<AppState>,
    path: std::result::Result<Path<Handle>, PathRejection>,
    query: std::result::Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>> {
    let handle = handle_from(path)?;
    let Query(query) = query.map_err(|e| AtomSpaceError::bad_request(e.body_text()))?;
    let space = state.space.as_ref();
    let atom = space.get(handle)?;
    let success = space.remove(atom.handle(), query.recursive)?;
    info!(handle, recursive = query.recursive, success, "atom removal requested");
    Ok(Json(DeleteResponse {
        result: DeleteAtomResponse { handle, success },
    }))
}

/// POST /api/v1/atoms
async fn create_atom(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateAtomRequest>, JsonRejection>,
) -> Result<Json<AtomResponse>> {
    let Json(request) = body.map_err(|e| AtomSpaceError::bad_request(e.body_text()))?;
    let space = state.space.as_ref();
    let handle = create(space, request)?;
    fetch(space, handle)
}

/// GET /api/v1/atoms
async fn list_atoms(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse>> {
    let Query(query) = query.map_err(|e| AtomSpaceError::bad_request(e.body_text()))?;
    let atoms = state.space.find(&query.filter()?)?;
    let atoms: Vec<AtomFields> = atoms.iter().map(marshal).collect();
    Ok(Json(ListResponse {
        result: AtomListing {
            complete: true,
            skipped: false,
            total: atoms.len(),
            atoms,
        },
    }))
}

/// GET /api/v1/types
async fn list_types() -> Json<TypesResponse> {
    Json(TypesResponse {
        types: AtomType::ALL.iter().map(|t| t.name()).collect(),
    })
}

/// Adds the described atom to the space and applies its values, returning its handle.
pub fn create(space: &dyn AtomSpace, request: CreateAtomRequest) -> Result<Handle> {
    let tv = request.truthvalue.as_ref().map(parse_truth_value).transpose()?;
    let handle = if request.atom_type.is_node() {
        if !request.outgoing.is_empty() {
            return Err(AtomSpaceError::bad_request(
                "Invalid request: nodes cannot have an outgoing set",
            ));
        }
        let name = request.name.as_deref().ok_or_else(|| {
            AtomSpaceError::bad_request("Invalid request: a node requires a name parameter")
        })?;
        space.add_node(request.atom_type, name, tv)?
    } else {
        if request.name.as_deref().is_some_and(|n| !n.is_empty()) {
            return Err(AtomSpaceError::bad_request(
                "Invalid request: links cannot have a name",
            ));
        }
        space.add_link(request.atom_type, &request.outgoing, tv)?
    };
    if let Some(av) = &request.attentionvalue {
        let (sti, lti, vlti) = parse_attention_value(av);
        space.set_av(handle, sti, lti, vlti)?;
    }
    let atom = space.get(handle)?;
    info!(%atom, "atom created");
    Ok(handle)
}

/// Creates every atom listed in a JSON seed file, in order. Links in the file
/// refer to handles as the space will issue them.
pub fn load_seed(space: &dyn AtomSpace, path: &FsPath) -> Result<usize> {
    let text = std::fs::read_to_string(path)?;
    let requests: Vec<CreateAtomRequest> = serde_json::from_str(&text)
        .map_err(|e| AtomSpaceError::Config(format!("seed file {}: {e}", path.display())))?;
    let count = requests.len();
    for request in requests {
        create(space, request)?;
    }
    info!(count, path = %path.display(), "seed loaded");
    Ok(count)
}
