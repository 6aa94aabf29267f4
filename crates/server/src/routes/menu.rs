//! Menu routes.
//!
//! Read-only JSON views over the fixed beverage menu. Every endpoint is
//! public; the menu never changes at runtime.

use axum::{Json, extract::Path, extract::State};
use serde::Serialize;

use crate::error::AppError;
use crate::menu::{Category, CategoryId, Drink, Menu};
use crate::state::AppState;

/// Response wrapping the full menu.
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub message: &'static str,
    pub menu: Menu,
}

/// Response for a single category.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category: CategoryId,
    pub category_name: &'static str,
    pub drinks: Vec<Drink>,
}

/// Response for a single drink, tagged with the category it lives in.
#[derive(Debug, Serialize)]
pub struct DrinkResponse {
    pub drink: Drink,
    pub category: CategoryId,
}

/// Get the full menu, grouped by category.
///
/// GET /api/menu
pub async fn full_menu(State(state): State<AppState>) -> Json<MenuResponse> {
    Json(MenuResponse {
        message: "OfficeBar Menu",
        menu: state.menu().clone(),
    })
}

/// Get the drinks in one category.
///
/// GET /api/menu/category/{category}
///
/// # Errors
///
/// Returns 404 when the category name is not one of the known three.
pub async fn category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let id: CategoryId = category
        .parse()
        .map_err(|_| AppError::NotFound("Category not found".to_string()))?;
    let Category { name, drinks, .. } = state.menu().category(id).clone();

    Ok(Json(CategoryResponse {
        category: id,
        category_name: name,
        drinks,
    }))
}

/// Look up a single drink by id across all categories.
///
/// GET /api/menu/drink/{drink_id}
///
/// # Errors
///
/// Returns 404 when no drink carries the given id.
pub async fn drink(
    State(state): State<AppState>,
    Path(drink_id): Path<String>,
) -> Result<Json<DrinkResponse>, AppError> {
    let (category, drink) = state
        .menu()
        .find_drink(&drink_id)
        .ok_or_else(|| AppError::NotFound("Drink not found".to_string()))?;

    Ok(Json(DrinkResponse {
        drink: drink.clone(),
        category,
    }))
}
