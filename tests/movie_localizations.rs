mod common;

use uuid::Uuid;

use cinemap::error::ApiError;
use cinemap::models::{LocalizedMovieDto, MovieLocalizationsDto};
use common::{services, wolf_movie};

fn localized(locale: &str, title: &str, tagline: Option<&str>) -> LocalizedMovieDto {
    LocalizedMovieDto {
        locale: locale.to_string(),
        title: title.to_string(),
        overview: None,
        tagline: tagline.map(|t| t.to_string()),
        poster_url: None,
    }
}

fn bundle(uuid: Uuid, entries: Vec<LocalizedMovieDto>) -> MovieLocalizationsDto {
    MovieLocalizationsDto { uuid, localizations: entries }
}

#[tokio::test]
async fn get_returns_every_locale_ordered() {
    let (movies, _, _) = services().await;
    let uuid = Uuid::new_v4();

    movies.save(&wolf_movie(uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    movies
        .update_localizations(
            uuid,
            &bundle(uuid, vec![localized("de", "Der mit dem Wolf tanzt - Title", None)]),
            false,
        )
        .await
        .unwrap();

    let got = movies.get_localizations(uuid).await.unwrap();
    assert_eq!(got.uuid, uuid);
    assert_eq!(got.localizations.len(), 2);
    assert_eq!(got.localizations[0].locale, "de");
    assert_eq!(got.localizations[0].title, "Der mit dem Wolf tanzt - Title");
    assert_eq!(got.localizations[1].locale, "en");
    assert_eq!(got.localizations[1].title, "Dances with Wolves - Title");
}

#[tokio::test]
async fn localizations_for_unknown_movie_are_not_found() {
    let (movies, _, _) = services().await;
    let uuid = Uuid::new_v4();

    let err = movies.get_localizations(uuid).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let err = movies
        .update_localizations(uuid, &bundle(uuid, vec![localized("en", "Title", None)]), true)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn no_override_leaves_existing_locale_untouched() {
    let (movies, _, _) = services().await;
    let uuid = Uuid::new_v4();

    movies.save(&wolf_movie(uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    let before = movies.find_by_uuid(uuid, "en").await.unwrap();

    movies
        .update_localizations(
            uuid,
            &bundle(uuid, vec![localized("en", "Replacement Title", Some("new tagline"))]),
            false,
        )
        .await
        .unwrap();

    let after = movies.find_by_uuid(uuid, "en").await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn no_override_still_adds_missing_locales() {
    let (movies, _, _) = services().await;
    let uuid = Uuid::new_v4();

    movies.save(&wolf_movie(uuid, "en", "Dances with Wolves - Title")).await.unwrap();

    // A new locale is an addition, not an override.
    movies
        .update_localizations(
            uuid,
            &bundle(uuid, vec![localized("de", "Der mit dem Wolf tanzt - Title", None)]),
            false,
        )
        .await
        .unwrap();

    let de = movies.find_by_uuid(uuid, "de").await.unwrap();
    assert_eq!(de.locale, "de");
    assert_eq!(de.title, "Der mit dem Wolf tanzt - Title");
}

#[tokio::test]
async fn override_replaces_full_field_set_and_spares_siblings() {
    let (movies, _, _) = services().await;
    let uuid = Uuid::new_v4();

    movies.save(&wolf_movie(uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    movies
        .update_localizations(
            uuid,
            &bundle(uuid, vec![localized("de", "Der mit dem Wolf tanzt - Title", None)]),
            false,
        )
        .await
        .unwrap();

    movies
        .update_localizations(
            uuid,
            &bundle(uuid, vec![localized("en", "Replacement Title", None)]),
            true,
        )
        .await
        .unwrap();

    // The English record was fully replaced: the fixture's overview, tagline
    // and poster are gone, not carried over.
    let en = movies.find_by_uuid(uuid, "en").await.unwrap();
    assert_eq!(en.title, "Replacement Title");
    assert_eq!(en.overview, None);
    assert_eq!(en.tagline, None);
    assert_eq!(en.poster_url, None);

    let de = movies.find_by_uuid(uuid, "de").await.unwrap();
    assert_eq!(de.title, "Der mit dem Wolf tanzt - Title");
}

#[tokio::test]
async fn merge_never_touches_core_fields() {
    let (movies, _, _) = services().await;
    let uuid = Uuid::new_v4();

    movies.save(&wolf_movie(uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    movies
        .update_localizations(
            uuid,
            &bundle(uuid, vec![localized("en", "Replacement Title", None)]),
            true,
        )
        .await
        .unwrap();

    let found = movies.find_by_uuid(uuid, "en").await.unwrap();
    assert_eq!(found.uuid, uuid);
    assert_eq!(found.tmdb_id, Some(581));
    assert_eq!(found.release_year, Some(1990));
    assert_eq!(found.imdb_id.as_deref(), Some("tt0099348"));
    assert_eq!(found.genres.len(), 2);
}
