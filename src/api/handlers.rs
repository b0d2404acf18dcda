//! HTTP handlers for generation and post endpoints

use crate::app::App;
use crate::models::{
    CreatePostRequest, CreatePostResponse, GenerateRequest, GenerateResponse, MessageResponse,
};
use crate::Result;
use actix_web::{web, HttpResponse};

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Hello from the prompt gallery backend!".to_string(),
    })
}

/// Liveness probe for the generation endpoint
pub async fn generation_status() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Hello from Replicate!".to_string(),
    })
}

pub async fn generate_image(
    app: web::Data<App>,
    req: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    let prompt = req.into_inner().prompt.unwrap_or_default();
    let photo = app.generation().generate(&prompt).await?;

    Ok(HttpResponse::Ok().json(GenerateResponse { photo }))
}

pub async fn create_post(
    app: web::Data<App>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let post = app
        .posts()
        .create_post(
            req.name.as_deref().unwrap_or_default(),
            req.prompt.as_deref().unwrap_or_default(),
            req.photo.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(CreatePostResponse {
        success: true,
        data: post,
    }))
}
