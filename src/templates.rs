use maud::{DOCTYPE, Markup, html};

use crate::models::MovieFlatDto;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn movies_page(locale: &str, movies: &[MovieFlatDto]) -> String {
    page(
        "Cinemap",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Cinemap" }
                        p class="mt-2 text-gray-600" {
                            "Movies in the catalog, localized for '" (locale) "'."
                        }

                        @if movies.is_empty() {
                            p class="mt-8 text-gray-500" { "The catalog is empty." }
                        } @else {
                            ul class="mt-8 divide-y divide-gray-200" {
                                @for movie in movies {
                                    (movie_row(movie))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn movie_row(movie: &MovieFlatDto) -> Markup {
    html! {
        li class="py-4 flex gap-4" {
            @if let Some(poster) = &movie.poster_url {
                img class="h-24 w-16 rounded object-cover" src=(poster) alt=(movie.title);
            }
            div {
                h2 class="font-semibold text-gray-900" {
                    (movie.title)
                    @if let Some(year) = movie.release_year {
                        span class="ml-2 text-gray-500 font-normal" { "(" (year) ")" }
                    }
                }
                @if let Some(tagline) = &movie.tagline {
                    p class="text-sm italic text-gray-500" { (tagline) }
                }
                @if let Some(overview) = &movie.overview {
                    p class="mt-1 text-sm text-gray-600" { (overview) }
                }
            }
        }
    }
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-xl font-semibold text-red-700" { "Something went wrong" }
                        p class="mt-2 text-gray-600" { (message) }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}
