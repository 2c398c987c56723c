//! HTTP-level integration tests for the `/cinema/movies` endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{
    body_json, customer_token, delete_auth, get, get_auth, patch_json_auth, post_form_auth,
    post_json_auth, post_multipart_auth, put_json_auth, sample_jpeg, staff_token, Part,
    MEDIA_URL,
};
use sqlx::PgPool;

use cinema_core::types::DbId;
use cinema_db::models::actor::{Actor, CreateActor};
use cinema_db::models::cinema_hall::CreateCinemaHall;
use cinema_db::models::genre::{CreateGenre, Genre};
use cinema_db::models::movie::{CreateMovie, Movie, MovieDetail, MovieFilter, MovieListItem};
use cinema_db::models::movie_session::CreateMovieSession;
use cinema_db::repositories::{
    ActorRepo, CinemaHallRepo, GenreRepo, MovieRepo, MovieSessionRepo,
};

const MOVIES_URL: &str = "/api/v1/cinema/movies";
const SESSIONS_URL: &str = "/api/v1/cinema/movie-sessions";

fn detail_url(id: DbId) -> String {
    format!("{MOVIES_URL}/{id}")
}

fn upload_url(id: DbId) -> String {
    format!("{MOVIES_URL}/{id}/upload-image")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

async fn sample_movie(pool: &PgPool, title: &str, genres: Vec<DbId>, actors: Vec<DbId>) -> Movie {
    MovieRepo::create(
        pool,
        &CreateMovie {
            title: title.to_string(),
            description: "Sample description".to_string(),
            duration: 90,
            genres,
            actors,
        },
    )
    .await
    .expect("movie creation should succeed")
}

async fn sample_genre(pool: &PgPool, name: &str) -> Genre {
    GenreRepo::create(pool, &CreateGenre { name: name.to_string() })
        .await
        .expect("genre creation should succeed")
}

async fn sample_actor(pool: &PgPool, first_name: &str, last_name: &str) -> Actor {
    ActorRepo::create(
        pool,
        &CreateActor {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        },
    )
    .await
    .expect("actor creation should succeed")
}

async fn sample_movie_session(pool: &PgPool, movie_id: DbId) -> DbId {
    let hall = CinemaHallRepo::create(
        pool,
        &CreateCinemaHall {
            name: "Blue".to_string(),
            rows: 20,
            seats_in_row: 20,
        },
    )
    .await
    .expect("hall creation should succeed");

    MovieSessionRepo::create(
        pool,
        &CreateMovieSession {
            show_time: Utc.with_ymd_and_hms(2022, 6, 2, 14, 0, 0).unwrap(),
            movie: movie_id,
            cinema_hall: hall.id,
        },
    )
    .await
    .expect("session creation should succeed")
    .id
}

/// Expected list output for all movies matching `filter`.
async fn expected_list(pool: &PgPool, filter: &MovieFilter) -> serde_json::Value {
    let movies = MovieRepo::list(pool, filter).await.unwrap();
    let ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();
    let genres = MovieRepo::genres_for_movies(pool, &ids).await.unwrap();
    let actors = MovieRepo::actors_for_movies(pool, &ids).await.unwrap();
    let items: Vec<MovieListItem> = movies
        .iter()
        .map(|m| MovieListItem::build(m, &genres, &actors, MEDIA_URL))
        .collect();
    serde_json::to_value(items).unwrap()
}

fn ids_of(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .expect("response should be an array")
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Unauthenticated
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, MOVIES_URL).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, MOVIES_URL, "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Authenticated reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_movies(pool: PgPool) {
    let genre = sample_genre(&pool, "Drama").await;
    let actor = sample_actor(&pool, "George", "Clooney").await;
    sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    sample_movie(&pool, "Sample movie 2", vec![genre.id], vec![actor.id]).await;
    let token = customer_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, MOVIES_URL, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, expected_list(&pool, &MovieFilter::default()).await);
    assert_eq!(json[1]["genres"], serde_json::json!(["Drama"]));
    assert_eq!(json[1]["actors"], serde_json::json!(["George Clooney"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_movies_by_title(pool: PgPool) {
    let wanted = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    sample_movie(&pool, "Another one", vec![], vec![]).await;
    let token = customer_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("{MOVIES_URL}?title=SAMPLE"), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(ids_of(&json), vec![wanted.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_movies_by_genres(pool: PgPool) {
    let drama = sample_genre(&pool, "Drama").await;
    let comedy = sample_genre(&pool, "Comedy").await;
    let movie1 = sample_movie(&pool, "Movie 1", vec![drama.id], vec![]).await;
    let movie2 = sample_movie(&pool, "Movie 2", vec![comedy.id], vec![]).await;
    let movie3 = sample_movie(&pool, "Movie without genres", vec![], vec![]).await;
    let token = customer_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("{MOVIES_URL}?genres={},{}", drama.id, comedy.id);
    let json = body_json(get_auth(app, &uri, &token).await).await;

    let ids = ids_of(&json);
    assert_eq!(ids, vec![movie1.id, movie2.id]);
    assert!(!ids.contains(&movie3.id));

    let filter = MovieFilter {
        genre_ids: Some(vec![drama.id, comedy.id]),
        ..Default::default()
    };
    assert_eq!(json, expected_list(&pool, &filter).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_movies_by_actors(pool: PgPool) {
    let clooney = sample_actor(&pool, "George", "Clooney").await;
    let pitt = sample_actor(&pool, "Brad", "Pitt").await;
    let movie1 = sample_movie(&pool, "Movie 1", vec![], vec![clooney.id]).await;
    let movie2 = sample_movie(&pool, "Movie 2", vec![], vec![pitt.id]).await;
    let movie3 = sample_movie(&pool, "Movie without actors", vec![], vec![]).await;
    let token = customer_token(&pool).await;

    let app = common::build_test_app(pool);
    let uri = format!("{MOVIES_URL}?actors={},{}", clooney.id, pitt.id);
    let json = body_json(get_auth(app, &uri, &token).await).await;

    let ids = ids_of(&json);
    assert_eq!(ids, vec![movie1.id, movie2.id]);
    assert!(!ids.contains(&movie3.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_combine(pool: PgPool) {
    let drama = sample_genre(&pool, "Drama").await;
    let clooney = sample_actor(&pool, "George", "Clooney").await;
    let both = sample_movie(&pool, "Both", vec![drama.id], vec![clooney.id]).await;
    sample_movie(&pool, "Genre only", vec![drama.id], vec![]).await;
    sample_movie(&pool, "Actor only", vec![], vec![clooney.id]).await;
    let token = customer_token(&pool).await;

    let app = common::build_test_app(pool);
    let uri = format!("{MOVIES_URL}?genres={}&actors={}", drama.id, clooney.id);
    let json = body_json(get_auth(app, &uri, &token).await).await;

    assert_eq!(ids_of(&json), vec![both.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_id_filter_returns_400(pool: PgPool) {
    let token = customer_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("{MOVIES_URL}?genres=1,drama"), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_retrieve_movie_detail(pool: PgPool) {
    let genre = sample_genre(&pool, "Drama").await;
    let actor = sample_actor(&pool, "George", "Clooney").await;
    let movie = sample_movie(&pool, "Sample movie", vec![genre.id], vec![actor.id]).await;
    let token = customer_token(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &detail_url(movie.id), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let genres = MovieRepo::genres_for_movies(&pool, &[movie.id]).await.unwrap();
    let actors = MovieRepo::actors_for_movies(&pool, &[movie.id]).await.unwrap();
    let expected = MovieDetail::build(&movie, &genres, &actors, MEDIA_URL);
    assert_eq!(json, serde_json::to_value(expected).unwrap());
    assert_eq!(json["genres"][0]["name"], "Drama");
    assert_eq!(json["actors"][0]["full_name"], "George Clooney");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_retrieve_unknown_movie_returns_404(pool: PgPool) {
    let token = customer_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &detail_url(999_999), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_customer_cannot_create_movie(pool: PgPool) {
    let token = customer_token(&pool).await;
    let app = common::build_test_app(pool);

    let payload = serde_json::json!({
        "title": "Movie",
        "description": "Description",
        "duration": 90,
    });
    let response = post_json_auth(app, MOVIES_URL, payload, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_creates_movie(pool: PgPool) {
    let token = staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "title": "Movie",
        "description": "Description",
        "duration": 90,
    });
    let response = post_json_auth(app, MOVIES_URL, payload, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let movie = MovieRepo::find_by_id(&pool, json["id"].as_i64().unwrap())
        .await
        .unwrap()
        .expect("movie should be stored");
    assert_eq!(movie.title, "Movie");
    assert_eq!(movie.description, "Description");
    assert_eq!(movie.duration, 90);
    assert_eq!(movie.image, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_movie_with_genres_and_actors(pool: PgPool) {
    let drama = sample_genre(&pool, "Drama").await;
    let comedy = sample_genre(&pool, "Comedy").await;
    let actor = sample_actor(&pool, "George", "Clooney").await;
    let token = staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "title": "Movie",
        "description": "Description",
        "duration": 90,
        "genres": [drama.id, comedy.id],
        "actors": [actor.id],
    });
    let response = post_json_auth(app, MOVIES_URL, payload, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["genres"], serde_json::json!([drama.id, comedy.id]));
    assert_eq!(json["actors"], serde_json::json!([actor.id]));

    let id = json["id"].as_i64().unwrap();
    assert_eq!(
        MovieRepo::genre_ids(&pool, id).await.unwrap(),
        vec![drama.id, comedy.id]
    );
    assert_eq!(MovieRepo::actor_ids(&pool, id).await.unwrap(), vec![actor.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_movie_with_unknown_genre_returns_400(pool: PgPool) {
    let token = staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "title": "Movie",
        "duration": 90,
        "genres": [424242],
    });
    let response = post_json_auth(app, MOVIES_URL, payload, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = MovieRepo::list(&pool, &MovieFilter::default()).await.unwrap();
    assert!(stored.is_empty(), "failed create must not leave a movie behind");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_movie_rejects_invalid_fields(pool: PgPool) {
    let token = staff_token(&pool).await;

    for payload in [
        serde_json::json!({ "title": "  ", "duration": 90 }),
        serde_json::json!({ "title": "Movie", "duration": 0 }),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, MOVIES_URL, payload, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_movie_from_urlencoded_form(pool: PgPool) {
    let genre = sample_genre(&pool, "Drama").await;
    let token = staff_token(&pool).await;
    let app = common::build_test_app(pool);

    let genre_id = genre.id.to_string();
    let response = post_form_auth(
        app,
        MOVIES_URL,
        &[
            ("title", "Form+movie"),
            ("duration", "95"),
            ("genres", &genre_id),
        ],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Form movie");
    assert_eq!(json["duration"], 95);
    assert_eq!(json["genres"], serde_json::json!([genre.id]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_rejects_put_patch_delete(pool: PgPool) {
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = staff_token(&pool).await;
    let payload = serde_json::json!({ "title": "Changed", "duration": 10 });

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &detail_url(movie.id), payload.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(app, &detail_url(movie.id), payload, &token).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &detail_url(movie.id), &token).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let unchanged = MovieRepo::find_by_id(&pool, movie.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Sample movie");
}

// ---------------------------------------------------------------------------
// Image upload
// ---------------------------------------------------------------------------

/// Map a public media URL back to its file under `media_root`.
fn stored_file(media_root: &std::path::Path, url: &str) -> std::path::PathBuf {
    let relative = url
        .strip_prefix(MEDIA_URL)
        .expect("image URL should live under the media prefix")
        .trim_start_matches('/');
    media_root.join(relative)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_image_to_movie(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = staff_token(&pool).await;
    let jpeg = sample_jpeg();

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let response = post_multipart_auth(
        app,
        &upload_url(movie.id),
        &[Part::File {
            name: "image",
            filename: "poster.jpg",
            content_type: "image/jpeg",
            data: &jpeg,
        }],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], movie.id);
    let url = json["image"].as_str().expect("response should contain image");
    assert!(url.starts_with("/media/uploads/movies/sample-movie-"), "got {url}");
    assert!(url.ends_with(".jpg"));
    assert!(stored_file(media.path(), url).exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_invalid_image_returns_400(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = staff_token(&pool).await;

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let response = post_multipart_auth(
        app,
        &upload_url(movie.id),
        &[Part::Text("image", "not image")],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let stored = MovieRepo::find_by_id(&pool, movie.id).await.unwrap().unwrap();
    assert_eq!(stored.image, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_without_image_field_returns_400(pool: PgPool) {
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = staff_token(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_multipart_auth(
        app,
        &upload_url(movie.id),
        &[Part::Text("caption", "poster")],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_customer_cannot_upload_image(pool: PgPool) {
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = customer_token(&pool).await;
    let jpeg = sample_jpeg();

    let app = common::build_test_app(pool);
    let response = post_multipart_auth(
        app,
        &upload_url(movie.id),
        &[Part::File {
            name: "image",
            filename: "poster.jpg",
            content_type: "image/jpeg",
            data: &jpeg,
        }],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_to_unknown_movie_returns_404(pool: PgPool) {
    let token = staff_token(&pool).await;
    let jpeg = sample_jpeg();

    let app = common::build_test_app(pool);
    let response = post_multipart_auth(
        app,
        &upload_url(999_999),
        &[Part::File {
            name: "image",
            filename: "poster.jpg",
            content_type: "image/jpeg",
            data: &jpeg,
        }],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reupload_replaces_previous_file(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = staff_token(&pool).await;
    let jpeg = sample_jpeg();
    let parts = [Part::File {
        name: "image",
        filename: "poster.jpg",
        content_type: "image/jpeg",
        data: &jpeg,
    }];

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let first = body_json(post_multipart_auth(app, &upload_url(movie.id), &parts, &token).await).await;
    let first_url = first["image"].as_str().unwrap().to_string();

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let second = body_json(post_multipart_auth(app, &upload_url(movie.id), &parts, &token).await).await;
    let second_url = second["image"].as_str().unwrap().to_string();

    assert_ne!(first_url, second_url);
    assert!(!stored_file(media.path(), &first_url).exists());
    assert!(stored_file(media.path(), &second_url).exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_uploads_leave_only_the_recorded_file(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = staff_token(&pool).await;
    let jpeg = sample_jpeg();
    let parts = [Part::File {
        name: "image",
        filename: "poster.jpg",
        content_type: "image/jpeg",
        data: &jpeg,
    }];

    let url = upload_url(movie.id);
    let (a, b) = tokio::join!(
        post_multipart_auth(
            common::build_test_app_with_media(pool.clone(), media.path()),
            &url,
            &parts,
            &token,
        ),
        post_multipart_auth(
            common::build_test_app_with_media(pool.clone(), media.path()),
            &url,
            &parts,
            &token,
        ),
    );
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);

    let stored = MovieRepo::find_by_id(&pool, movie.id).await.unwrap().unwrap();
    let recorded = stored.image.expect("an image is recorded");
    let files: Vec<_> = std::fs::read_dir(media.path().join("uploads/movies"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 1, "left on disk: {files:?}");
    assert!(recorded.ends_with(&files[0]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_sent_with_create_is_ignored(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let token = staff_token(&pool).await;
    let jpeg = sample_jpeg();

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let response = post_multipart_auth(
        app,
        MOVIES_URL,
        &[
            Part::Text("title", "Title"),
            Part::Text("description", "Description"),
            Part::Text("duration", "90"),
            Part::File {
                name: "image",
                filename: "poster.jpg",
                content_type: "image/jpeg",
                data: &jpeg,
            },
        ],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let movie = MovieRepo::find_by_id(&pool, json["id"].as_i64().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(movie.title, "Title");
    assert_eq!(movie.image, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_url_is_shown_everywhere(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    sample_movie_session(&pool, movie.id).await;
    let token = staff_token(&pool).await;
    let jpeg = sample_jpeg();

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let uploaded = body_json(
        post_multipart_auth(
            app,
            &upload_url(movie.id),
            &[Part::File {
                name: "image",
                filename: "poster.jpg",
                content_type: "image/jpeg",
                data: &jpeg,
            }],
            &token,
        )
        .await,
    )
    .await;
    let url = uploaded["image"].clone();
    assert!(url.is_string());

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let detail = body_json(get_auth(app, &detail_url(movie.id), &token).await).await;
    assert_eq!(detail["image"], url);

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let list = body_json(get_auth(app, MOVIES_URL, &token).await).await;
    assert_eq!(list[0]["image"], url);

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let sessions = body_json(get_auth(app, SESSIONS_URL, &token).await).await;
    assert_eq!(sessions[0]["movie_image"], url);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uploaded_image_is_served(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let movie = sample_movie(&pool, "Sample movie", vec![], vec![]).await;
    let token = staff_token(&pool).await;
    let jpeg = sample_jpeg();

    let app = common::build_test_app_with_media(pool.clone(), media.path());
    let uploaded = body_json(
        post_multipart_auth(
            app,
            &upload_url(movie.id),
            &[Part::File {
                name: "image",
                filename: "poster.jpg",
                content_type: "image/jpeg",
                data: &jpeg,
            }],
            &token,
        )
        .await,
    )
    .await;

    let app = common::build_test_app_with_media(pool, media.path());
    let response = get(app, uploaded["image"].as_str().unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
}
