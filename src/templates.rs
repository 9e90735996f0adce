use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    models::CandidateSummary,
    service::{MAX_RATING, MIN_RATING},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "Everything I've watched, best first." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for m in movies {
                                (movie_card(m))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(csrf_token: &str, title: &str, errors: &[String]) -> String {
    form_page(
        "Add a Movie",
        errors,
        html! {
            form class="mt-8 space-y-6" method="post" action="/add" {
                input type="hidden" name="csrf_token" value=(csrf_token);
                div {
                    label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                    input class=(INPUT_CLASS) name="title" id="title" value=(title) required;
                }
                button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[CandidateSummary]) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                        p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }

                        @if candidates.is_empty() {
                            p class="mt-8 text-gray-600" { "Nothing matched." }
                        } @else {
                            ul class="mt-8 divide-y divide-gray-200" {
                                @for c in candidates {
                                    li class="py-3" {
                                        a class="text-blue-600 hover:text-blue-800" href=(format!("/find_movie/id={}", c.id)) {
                                            (c.title)
                                            @if let Some(date) = c.release_date.as_deref().filter(|d| !d.is_empty()) {
                                                span class="ml-2 text-gray-500" { "- " (date) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
                    }
                }
            }
        },
    )
}

pub fn edit_page(
    m: &movie::Model,
    csrf_token: &str,
    rating: &str,
    review: &str,
    errors: &[String],
) -> String {
    form_page(
        &m.title,
        errors,
        html! {
            form class="mt-8 space-y-6" method="post" action=(format!("/edit/id={}", m.id)) {
                input type="hidden" name="csrf_token" value=(csrf_token);
                div {
                    label class="block text-sm font-medium text-gray-700" for="rating" {
                        "Your Rating Out of " (MAX_RATING) " e.g. 7.5"
                    }
                    input class=(INPUT_CLASS) type="number" step="0.1" min=(MIN_RATING) max=(MAX_RATING) name="rating" id="rating" value=(rating) required;
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                    input class=(INPUT_CLASS) name="review" id="review" value=(review) required;
                }
                button class=(BUTTON_CLASS) type="submit" { "Done" }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

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

fn form_page(heading: &str, errors: &[String], form: Markup) -> String {
    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (heading) }
                        @if !errors.is_empty() {
                            ul class="mt-4 rounded-md bg-red-50 p-4 text-sm text-red-700" {
                                @for e in errors {
                                    li { (e) }
                                }
                            }
                        }
                        (form)
                    }
                }
            }
        },
    )
}

fn movie_card(m: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if let Some(img) = &m.img_url {
                img class="w-24 rounded" src=(img) alt=(m.title);
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(rank) = m.ranking {
                            span class="mr-2 text-gray-400" { "#" (rank) }
                        }
                        (m.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (m.year) ")" }
                    }
                    span class="text-lg font-semibold text-gray-700" {
                        @match m.rating {
                            Some(r) => { (format!("{r:.1}")) " / " (MAX_RATING) }
                            None => { "unrated" }
                        }
                    }
                }
                @if let Some(review) = &m.review {
                    p class="mt-2 italic text-gray-700" { (review) }
                }
                p class="mt-2 text-sm text-gray-600" { (m.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/id={}", m.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete/id={}", m.id)) { "Delete" }
                }
            }
        }
    }
}
