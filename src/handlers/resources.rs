use axum::{extract::Query, Json};

use crate::dto::ResourceQuery;
use crate::error::AppResult;
use crate::services::resources::{
    categories, filter_resources, helplines, Category, Helpline, Resource, ResourceFilter,
};

pub async fn list_resources(
    Query(query): Query<ResourceQuery>,
) -> AppResult<Json<Vec<&'static Resource>>> {
    let filter = ResourceFilter {
        category: query.category.as_deref(),
        kind: query.kind.as_deref(),
        query: query.q.as_deref(),
    };
    Ok(Json(filter_resources(&filter)?))
}

pub async fn list_categories() -> Json<&'static [Category]> {
    Json(categories())
}

pub async fn list_helplines() -> Json<&'static [Helpline]> {
    Json(helplines())
}
