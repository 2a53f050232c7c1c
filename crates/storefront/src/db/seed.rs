//! Demo records loaded at start-up.

use bookstore_core::{
    Book, BookId, Email, Order, OrderId, OrderLine, OrderStage, Price, Role, ShippingAddress,
    UserId,
};
use chrono::NaiveDate;

use crate::models::User;

/// The bundled demo accounts.
#[must_use]
pub fn users() -> Vec<User> {
    [
        (1, "John Doe", "user@example.com", "password", Role::User),
        (2, "John Smith", "john@example.com", "password123", Role::User),
        (3, "Jane Doe", "jane@example.com", "password123", Role::Admin),
    ]
    .into_iter()
    .filter_map(|(id, name, email, password, role)| {
        Some(User {
            id: UserId::new(id),
            name: name.to_owned(),
            email: Email::parse(email).ok()?,
            password: password.to_owned(),
            role,
            headline: None,
        })
    })
    .collect()
}

struct SeedBook {
    title: &'static str,
    author: &'static str,
    cents: i64,
    cover: &'static str,
    description: &'static str,
    isbn: &'static str,
    publisher: &'static str,
    published: (i32, u32, u32),
    pages: u32,
    category: &'static str,
    stock: u32,
}

const BOOKS: [SeedBook; 5] = [
    SeedBook {
        title: "The Great Gatsby",
        author: "F. Scott Fitzgerald",
        cents: 999,
        cover: "https://source.unsplash.com/random/300x400?book",
        description: "A novel about the American Dream and its corruption, set during the Roaring Twenties.",
        isbn: "9780743273565",
        publisher: "Scribner",
        published: (1925, 4, 10),
        pages: 180,
        category: "Classic Fiction",
        stock: 15,
    },
    SeedBook {
        title: "To Kill a Mockingbird",
        author: "Harper Lee",
        cents: 1299,
        cover: "https://source.unsplash.com/random/300x400?book,reading",
        description: "A powerful story about racial injustice and moral growth in the American South during the 1930s.",
        isbn: "9780061120084",
        publisher: "HarperCollins",
        published: (1960, 7, 11),
        pages: 281,
        category: "Classic Fiction",
        stock: 10,
    },
    SeedBook {
        title: "1984",
        author: "George Orwell",
        cents: 1099,
        cover: "https://source.unsplash.com/random/300x400?dystopia",
        description: "A dystopian novel that portrays a totalitarian society and explores themes of surveillance and control.",
        isbn: "9780451524935",
        publisher: "Signet Classic",
        published: (1949, 6, 8),
        pages: 328,
        category: "Dystopian Fiction",
        stock: 20,
    },
    SeedBook {
        title: "Pride and Prejudice",
        author: "Jane Austen",
        cents: 899,
        cover: "https://source.unsplash.com/random/300x400?classic",
        description: "A romantic novel that follows the emotional development of Elizabeth Bennet in 19th century England.",
        isbn: "9780141439518",
        publisher: "Penguin Classics",
        published: (1813, 1, 28),
        pages: 432,
        category: "Romance",
        stock: 8,
    },
    SeedBook {
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
        cents: 1499,
        cover: "https://source.unsplash.com/random/300x400?fantasy",
        description: "A fantasy novel about the adventures of Bilbo Baggins on a quest to help dwarves reclaim their treasure.",
        isbn: "9780547928227",
        publisher: "Houghton Mifflin Harcourt",
        published: (1937, 9, 21),
        pages: 300,
        category: "Fantasy",
        stock: 25,
    },
];

/// The bundled catalog, ids 1 to 5.
#[must_use]
pub fn books() -> Vec<Book> {
    (1..)
        .zip(BOOKS.iter())
        .map(|(id, seed)| {
            let (year, month, day) = seed.published;
            Book {
                id: BookId::new(id),
                title: seed.title.to_owned(),
                author: seed.author.to_owned(),
                price: Price::from_cents(seed.cents),
                cover_image: seed.cover.to_owned(),
                description: seed.description.to_owned(),
                isbn: seed.isbn.to_owned(),
                publisher: seed.publisher.to_owned(),
                publication_date: NaiveDate::from_ymd_opt(year, month, day),
                pages: seed.pages,
                category: seed.category.to_owned(),
                stock: seed.stock,
            }
        })
        .collect()
}

/// The bundled sample order, charged `shipping`.
#[must_use]
pub fn orders(shipping: Price) -> Vec<Order> {
    let (Some(placed_on), Some(estimated_delivery)) = (
        NaiveDate::from_ymd_opt(2023, 9, 1),
        NaiveDate::from_ymd_opt(2023, 9, 10),
    ) else {
        return Vec::new();
    };

    let books = books();
    let line = |id: u32, quantity: u32| {
        books.iter().find(|b| b.id.get() == id).map(|b| OrderLine {
            book_id: b.id,
            title: b.title.clone(),
            author: b.author.clone(),
            price: b.price,
            quantity,
            cover_image: b.cover_image.clone(),
        })
    };

    vec![Order {
        id: OrderId::new(1_234_567),
        placed_on,
        estimated_delivery,
        stage: OrderStage::Shipped,
        lines: [line(1, 1), line(3, 3)].into_iter().flatten().collect(),
        shipping,
        shipping_address: ShippingAddress {
            name: "John Doe".to_owned(),
            street: "123 Main St".to_owned(),
            city: "New York".to_owned(),
            state: "NY".to_owned(),
            zip_code: "10001".to_owned(),
            country: "USA".to_owned(),
        },
    }]
}
