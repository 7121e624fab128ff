mod common;

use uuid::Uuid;

use cinemap::error::ApiError;
use cinemap::models::{LocalizedSceneDto, SceneLocalizationsDto};
use common::{scene, services, wolf_movie};

#[tokio::test]
async fn scene_requires_an_existing_movie() {
    let (_, scenes, _) = services().await;
    let movie_uuid = Uuid::new_v4();

    let err =
        scenes.save(&scene(Uuid::new_v4(), movie_uuid, "en", "Opening"), movie_uuid).await;
    assert!(matches!(err.unwrap_err(), ApiError::NotFound(_)));
}

#[tokio::test]
async fn scene_uuid_must_be_globally_unique() {
    let (movies, scenes, _) = services().await;
    let movie_uuid = Uuid::new_v4();
    let scene_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    scenes.save(&scene(scene_uuid, movie_uuid, "en", "Opening"), movie_uuid).await.unwrap();

    let err = scenes.save(&scene(scene_uuid, movie_uuid, "en", "Again"), movie_uuid).await;
    assert!(matches!(err.unwrap_err(), ApiError::UuidInUse(_)));

    let all = scenes.find_all_for_movie(movie_uuid, "en").await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn scene_locale_fallback_matches_movie_behavior() {
    let (movies, scenes, _) = services().await;
    let movie_uuid = Uuid::new_v4();
    let scene_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    scenes.save(&scene(scene_uuid, movie_uuid, "en", "Fort Sedgewick"), movie_uuid).await.unwrap();

    let found = scenes.find_by_uuid(movie_uuid, scene_uuid, "de").await.unwrap();
    assert_eq!(found.locale, "en");
    assert_eq!(found.description, "Fort Sedgewick");
    assert_eq!(found.movie_uuid, movie_uuid);
}

#[tokio::test]
async fn scene_without_requested_or_default_locale_fails() {
    let (movies, scenes, _) = services().await;
    let movie_uuid = Uuid::new_v4();
    let scene_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    scenes.save(&scene(scene_uuid, movie_uuid, "de", "Fort Sedgewick"), movie_uuid).await.unwrap();

    let err = scenes.find_by_uuid(movie_uuid, scene_uuid, "fr").await.unwrap_err();
    assert!(matches!(err, ApiError::LocaleNotFound(_)));
}

#[tokio::test]
async fn scene_lookup_under_the_wrong_movie_is_not_found() {
    let (movies, scenes, _) = services().await;
    let movie_a = Uuid::new_v4();
    let movie_b = Uuid::new_v4();
    let scene_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_a, "en", "Dances with Wolves - Title")).await.unwrap();
    movies.save(&wolf_movie(movie_b, "en", "Another Movie - Title")).await.unwrap();
    scenes.save(&scene(scene_uuid, movie_a, "en", "Opening"), movie_a).await.unwrap();

    let err = scenes.find_by_uuid(movie_b, scene_uuid, "en").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn scene_update_always_overrides_its_locale() {
    let (movies, scenes, _) = services().await;
    let movie_uuid = Uuid::new_v4();
    let scene_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    scenes.save(&scene(scene_uuid, movie_uuid, "en", "Fort Sedgewick"), movie_uuid).await.unwrap();

    let mut dto = scene(scene_uuid, movie_uuid, "en", "Fort Sedgewick at dusk");
    dto.latitude = 41.1579;
    dto.longitude = -104.8202;
    scenes.update(&dto, movie_uuid, scene_uuid).await.unwrap();

    let found = scenes.find_by_uuid(movie_uuid, scene_uuid, "en").await.unwrap();
    assert_eq!(found.description, "Fort Sedgewick at dusk");
    assert_eq!(found.latitude, 41.1579);
    assert_eq!(found.longitude, -104.8202);
    assert_eq!(found.uuid, scene_uuid);
}

#[tokio::test]
async fn scene_localization_merge_honors_override_flag() {
    let (movies, scenes, _) = services().await;
    let movie_uuid = Uuid::new_v4();
    let scene_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    scenes.save(&scene(scene_uuid, movie_uuid, "en", "Fort Sedgewick"), movie_uuid).await.unwrap();

    let bundle = SceneLocalizationsDto {
        uuid: scene_uuid,
        localizations: vec![
            LocalizedSceneDto { locale: "en".to_string(), description: "Replaced".to_string() },
            LocalizedSceneDto { locale: "de".to_string(), description: "Fort Sedgewick - DE".to_string() },
        ],
    };

    scenes.update_localizations(movie_uuid, scene_uuid, &bundle, false).await.unwrap();
    let got = scenes.get_localizations(movie_uuid, scene_uuid).await.unwrap();
    assert_eq!(got.localizations.len(), 2);
    // "en" existed: untouched. "de" was missing: added.
    assert_eq!(got.localizations[0].locale, "de");
    assert_eq!(got.localizations[0].description, "Fort Sedgewick - DE");
    assert_eq!(got.localizations[1].description, "Fort Sedgewick");

    scenes.update_localizations(movie_uuid, scene_uuid, &bundle, true).await.unwrap();
    let got = scenes.get_localizations(movie_uuid, scene_uuid).await.unwrap();
    assert_eq!(got.localizations[1].description, "Replaced");
}

#[tokio::test]
async fn delete_all_scenes_for_movie_leaves_the_movie() {
    let (movies, scenes, store) = services().await;
    let movie_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    scenes.save(&scene(Uuid::new_v4(), movie_uuid, "en", "One"), movie_uuid).await.unwrap();
    scenes.save(&scene(Uuid::new_v4(), movie_uuid, "en", "Two"), movie_uuid).await.unwrap();

    scenes.delete_all_for_movie(movie_uuid).await.unwrap();

    assert_eq!(store.count_scenes().await.unwrap(), 0);
    movies.find_by_uuid(movie_uuid, "en").await.unwrap();
}

#[tokio::test]
async fn delete_scene_then_again_is_not_found() {
    let (movies, scenes, _) = services().await;
    let movie_uuid = Uuid::new_v4();
    let scene_uuid = Uuid::new_v4();

    movies.save(&wolf_movie(movie_uuid, "en", "Dances with Wolves - Title")).await.unwrap();
    scenes.save(&scene(scene_uuid, movie_uuid, "en", "Opening"), movie_uuid).await.unwrap();

    scenes.delete_by_uuid(movie_uuid, scene_uuid).await.unwrap();
    let err = scenes.delete_by_uuid(movie_uuid, scene_uuid).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
