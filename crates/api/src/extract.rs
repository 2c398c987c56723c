//! Request body extractors that accept more than one encoding.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use cinema_core::error::CoreError;
use cinema_core::filters::parse_id_list;
use cinema_db::models::movie::CreateMovie;

use crate::error::AppError;
use crate::state::AppState;

/// A movie-create payload sent as JSON, `multipart/form-data` or
/// `application/x-www-form-urlencoded`.
///
/// Form encodings may repeat `genres` / `actors` or send them
/// comma-separated. An `image` field is accepted and dropped: images are
/// only set through the upload endpoint.
#[derive(Debug)]
pub struct MovieForm(pub CreateMovie);

impl FromRequest<AppState> for MovieForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        let movie = if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            let mut fields = MovieFields::default();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
            {
                let name = field.name().unwrap_or("").to_string();
                if !MovieFields::accepts(&name) {
                    continue; // skips `image` and anything unknown
                }
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                fields.push(&name, &value)?;
            }
            fields.finish()?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            let mut fields = MovieFields::default();
            for (name, value) in pairs {
                if MovieFields::accepts(&name) {
                    fields.push(&name, &value)?;
                }
            }
            fields.finish()?
        } else {
            let Json(movie) = Json::<CreateMovie>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            movie
        };

        validate_new_movie(&movie)?;
        Ok(MovieForm(movie))
    }
}

/// Field accumulator for the form encodings.
#[derive(Debug, Default)]
struct MovieFields {
    title: Option<String>,
    description: String,
    duration: Option<String>,
    genres: Vec<i64>,
    actors: Vec<i64>,
}

impl MovieFields {
    fn accepts(name: &str) -> bool {
        matches!(
            name,
            "title" | "description" | "duration" | "genres" | "actors"
        )
    }

    fn push(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        match name {
            "title" => self.title = Some(value.to_string()),
            "description" => self.description = value.to_string(),
            "duration" => self.duration = Some(value.to_string()),
            "genres" => extend_unique(&mut self.genres, parse_id_list(value, "genres")?),
            "actors" => extend_unique(&mut self.actors, parse_id_list(value, "actors")?),
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<CreateMovie, CoreError> {
        let title = self
            .title
            .ok_or_else(|| CoreError::Validation("title is required".into()))?;
        let raw_duration = self
            .duration
            .ok_or_else(|| CoreError::Validation("duration is required".into()))?;
        let duration: i32 = raw_duration.trim().parse().map_err(|_| {
            CoreError::Validation(format!("duration must be an integer, got '{raw_duration}'"))
        })?;

        Ok(CreateMovie {
            title,
            description: self.description,
            duration,
            genres: self.genres,
            actors: self.actors,
        })
    }
}

fn extend_unique(target: &mut Vec<i64>, ids: Option<Vec<i64>>) {
    for id in ids.into_iter().flatten() {
        if !target.contains(&id) {
            target.push(id);
        }
    }
}

/// Reject a blank title or a non-positive duration.
pub fn validate_new_movie(movie: &CreateMovie) -> Result<(), CoreError> {
    if movie.title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be blank".into()));
    }
    if movie.duration <= 0 {
        return Err(CoreError::Validation(format!(
            "duration must be a positive number of minutes, got {}",
            movie.duration
        )));
    }
    Ok(())
}
