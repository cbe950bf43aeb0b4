//! HTML pages and QR codes for the recipe book.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use qrcode::render::svg;
use qrcode::QrCode;
use trivet_core::{OutputFormat, RecipeFormatter};

use crate::AppState;

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut items = String::new();
    for key in state.book.keys() {
        let name = state.book.get(key).map_or(key, |r| r.name.as_str());
        items.push_str(&format!("<li><a href=\"/recipe/{key}\">{name}</a></li>"));
    }
    Html(page("Recipes", &format!("<h3>Recipes</h3><ul>{items}</ul>")))
}

pub async fn view_recipe(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let Some(recipe) = state.book.get(&name) else {
        return (StatusCode::NOT_FOUND, format!("no recipe named '{name}'")).into_response();
    };
    let formatter = RecipeFormatter::new(state.book.preferences(), state.book.converter());
    match formatter.render(recipe, OutputFormat::Html) {
        Ok(body) => {
            let body = format!(
                "{body}<p><img src=\"/qr/{name}.svg\" \
                 alt=\"QR code for {title}\" width=\"200\" height=\"200\"></p>",
                title = recipe.name
            );
            Html(page(&recipe.name, &body)).into_response()
        }
        Err(error) => {
            tracing::error!(%error, recipe = %name, "failed to render recipe");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("could not render '{name}': {error}"),
            )
                .into_response()
        }
    }
}

pub async fn recipe_qr(State(state): State<Arc<AppState>>, Path(file): Path<String>) -> Response {
    let Some(name) = file.strip_suffix(".svg") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if state.book.get(name).is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }
    let url = format!("http://{}/recipe/{}", state.host_base, name);
    let code = match QrCode::new(url.as_bytes()) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(%error, recipe = %name, "failed to build QR code");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let image = code.render::<svg::Color>().min_dimensions(200, 200).build();
    ([(header::CONTENT_TYPE, "image/svg+xml")], image).into_response()
}

/// Minimal page shell around a rendered body fragment.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>{title}</title></head><body>{body}</body></html>"
    )
}
