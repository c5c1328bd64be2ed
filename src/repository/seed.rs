//! Initial catalog content

use chrono::NaiveDate;

use crate::models::Book;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

#[allow(clippy::too_many_arguments)]
fn book(
    id: i64,
    title: &str,
    author: &str,
    genre: &str,
    year: i64,
    pages: i64,
    rating: f64,
    description: &str,
    available: bool,
    added_date: NaiveDate,
) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        year,
        pages,
        rating,
        description: description.to_string(),
        available,
        added_date,
    }
}

/// The five records every seeded catalog starts with
pub fn seed_books() -> Vec<Book> {
    vec![
        book(
            1,
            "El Señor de los Anillos",
            "J.R.R. Tolkien",
            "Fantasía",
            1954,
            1216,
            4.8,
            "Una épica historia de fantasía sobre la búsqueda para destruir un anillo poderoso.",
            true,
            date(2024, 1, 15),
        ),
        book(
            2,
            "1984",
            "George Orwell",
            "Distopía",
            1949,
            328,
            4.6,
            "Una novela distópica sobre vigilancia gubernamental y control social.",
            true,
            date(2024, 1, 20),
        ),
        book(
            3,
            "Cien Años de Soledad",
            "Gabriel García Márquez",
            "Realismo Mágico",
            1967,
            417,
            4.7,
            "La historia de la familia Buendía a lo largo de siete generaciones.",
            false,
            date(2024, 1, 10),
        ),
        book(
            4,
            "Harry Potter y la Piedra Filosofal",
            "J.K. Rowling",
            "Fantasía",
            1997,
            309,
            4.5,
            "La primera aventura del joven mago Harry Potter.",
            true,
            date(2024, 1, 25),
        ),
        book(
            5,
            "Don Quijote de la Mancha",
            "Miguel de Cervantes",
            "Novela",
            1605,
            863,
            4.4,
            "Las aventuras del ingenioso hidalgo Don Quijote y su fiel escudero Sancho Panza.",
            true,
            date(2024, 1, 5),
        ),
    ]
}
