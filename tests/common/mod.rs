//! # Shared Fixtures
//!
//! Domain types used across the converter test suites.

#![allow(dead_code)]

use siren::component::{FieldType, Method};
use siren::condition::{Condition, ConditionKind};
use siren::meta::{
    ActionMeta, FieldMeta, LinkMeta, PropertyDescriptor, PropertyType, Resource, SubEntityMeta,
    TypeDescriptor, TypeRegistry,
};
use chrono::{DateTime, TimeZone, Utc};
use siren::{CollectionResource, ReflectingConverter};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// A converter over its own registry, isolated from other tests.
pub fn converter() -> ReflectingConverter {
    ReflectingConverter::new().with_provider(Arc::new(TypeRegistry::new()))
}

// ---
// Videos and reviews
// ---

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Review {
    pub id: u64,
    pub reviewer: String,
    pub body: String,
    pub stars: i32,
    pub reviewdate: Option<DateTime<Utc>>,
}

impl Resource for Review {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("review")
            .property(PropertyDescriptor::field("id", |r: &Review| r.id, |r: &mut Review, v| r.id = v).identity())
            .property(PropertyDescriptor::field(
                "reviewer",
                |r: &Review| r.reviewer.clone(),
                |r: &mut Review, v| r.reviewer = v,
            ))
            .property(PropertyDescriptor::field("body", |r: &Review| r.body.clone(), |r: &mut Review, v| r.body = v))
            .property(PropertyDescriptor::field("stars", |r: &Review| r.stars, |r: &mut Review, v| r.stars = v))
            .property(PropertyDescriptor::field(
                "reviewdate",
                |r: &Review| r.reviewdate,
                |r: &mut Review, v| r.reviewdate = v,
            ))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Rating {
    G,
    #[default]
    Pg,
    Pg13,
    R,
}

siren::value_enum!(Rating { G => "G", Pg => "PG", Pg13 => "PG-13", R => "R" });

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "G",
            Rating::Pg => "PG",
            Rating::Pg13 => "PG-13",
            Rating::R => "R",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Video {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub rating: Rating,
    pub genres: Vec<String>,
    pub length: f64,
    pub published: bool,
    pub reviews: Vec<Shared<Review>>,
}

impl Resource for Video {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("video")
            .self_uri("/videos/{id}")
            .link(
                LinkMeta::new(["trailer"])
                    .uri("/videos/{id}/trailer")
                    .media_type("video/mp4")
                    .when(Condition::on("published", ConditionKind::True)),
            )
            .action(
                ActionMeta::new("add-review", "/videos/{id}/reviews")
                    .method(Method::Post)
                    .title("Add a review")
                    .field(FieldMeta::new("video").field_type(FieldType::Hidden).value("{id}"))
                    .field(FieldMeta::new("body").required().max_length(2000))
                    .field(FieldMeta::new("stars").field_type(FieldType::Number))
                    .when(Condition::on("published", ConditionKind::True)),
            )
            .property(PropertyDescriptor::field("id", |v: &Video| v.id, |v: &mut Video, id| v.id = id))
            .property(PropertyDescriptor::field("name", |v: &Video| v.name.clone(), |v: &mut Video, n| v.name = n))
            .property(PropertyDescriptor::field(
                "description",
                |v: &Video| v.description.clone(),
                |v: &mut Video, d| v.description = d,
            ))
            .property(PropertyDescriptor::field(
                "rating",
                |v: &Video| v.rating,
                |v: &mut Video, r| v.rating = r,
            ))
            .property(PropertyDescriptor::field(
                "genres",
                |v: &Video| v.genres.clone(),
                |v: &mut Video, g| v.genres = g,
            ))
            .property(PropertyDescriptor::field("length", |v: &Video| v.length, |v: &mut Video, l| v.length = l))
            .property(PropertyDescriptor::field(
                "published",
                |v: &Video| v.published,
                |v: &mut Video, p| v.published = p,
            ))
            .property(PropertyDescriptor::computed("summary", |v: &Video| {
                format!("{} ({})", v.name, v.rating.as_str())
            }))
            .property(
                PropertyDescriptor::field(
                    "reviews",
                    |v: &Video| v.reviews.clone(),
                    |v: &mut Video, r| v.reviews = r,
                )
                .sub_entity(
                    SubEntityMeta::new()
                        .rel(["reviews"])
                        .collection_uri("/videos/{parent.id}/reviews"),
                ),
            )
    }
}

pub fn review_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
}

pub fn sample_video() -> Video {
    Video {
        id: 42,
        name: "The Rust Book".to_string(),
        description: None,
        rating: Rating::Pg,
        genres: vec!["documentary".to_string(), "education".to_string()],
        length: 30.0,
        published: true,
        reviews: vec![
            shared(Review {
                id: 1,
                reviewer: "ana".to_string(),
                body: "Great.".to_string(),
                stars: 5,
                reviewdate: Some(review_date()),
            }),
            shared(Review {
                id: 2,
                reviewer: "bo".to_string(),
                body: "Long.".to_string(),
                stars: 3,
                reviewdate: None,
            }),
        ],
    }
}

// ---
// Orders and customers
// ---

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Customer {
    pub id: u64,
    pub name: String,
}

impl Resource for Customer {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("customer")
            .self_uri("/customers/{id}")
            .property(PropertyDescriptor::field("id", |c: &Customer| c.id, |c: &mut Customer, id| c.id = id))
            .property(PropertyDescriptor::field(
                "name",
                |c: &Customer| c.name.clone(),
                |c: &mut Customer, n| c.name = n,
            ))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Order {
    pub id: u64,
    pub total: f64,
    pub status: String,
    pub invoice: Option<String>,
    pub customer: Option<Shared<Customer>>,
}

impl Resource for Order {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("order")
            .class(["order", "commerce"])
            .self_uri("/orders/{id}")
            .action(
                ActionMeta::new("cancel", "/orders/{id}")
                    .method(Method::Delete)
                    .when(Condition::on("status", ConditionKind::Equals("open".into()))),
            )
            .property(PropertyDescriptor::field("id", |o: &Order| o.id, |o: &mut Order, id| o.id = id))
            .property(PropertyDescriptor::field("total", |o: &Order| o.total, |o: &mut Order, t| o.total = t))
            .property(
                PropertyDescriptor::field("status", |o: &Order| o.status.clone(), |o: &mut Order, s| o.status = s)
                    .rename("orderStatus"),
            )
            .property(
                PropertyDescriptor::field(
                    "invoice",
                    |o: &Order| o.invoice.clone(),
                    |o: &mut Order, i| o.invoice = i,
                )
                .link(LinkMeta::new(["invoice"]).media_type("application/pdf")),
            )
            .property(
                PropertyDescriptor::field(
                    "customer",
                    |o: &Order| o.customer.clone(),
                    |o: &mut Order, c| o.customer = c,
                )
                .sub_entity(SubEntityMeta::new().rel(["customer"]).embedded_link()),
            )
    }
}

// ---
// Graphs
// ---

#[derive(Debug, Default)]
pub struct Person {
    pub name: String,
    pub friend: Option<Shared<Person>>,
}

impl Resource for Person {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("person")
            .property(PropertyDescriptor::field(
                "name",
                |p: &Person| p.name.clone(),
                |p: &mut Person, n| p.name = n,
            ))
            .property(PropertyDescriptor::field(
                "friend",
                |p: &Person| p.friend.clone(),
                |p: &mut Person, f| p.friend = f,
            ))
    }
}

#[derive(Debug, Default)]
pub struct Folder {
    pub name: String,
    pub children: Vec<Shared<Folder>>,
}

impl Resource for Folder {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("folder")
            .property(PropertyDescriptor::field(
                "name",
                |f: &Folder| f.name.clone(),
                |f: &mut Folder, n| f.name = n,
            ))
            .property(PropertyDescriptor::field(
                "children",
                |f: &Folder| f.children.clone(),
                |f: &mut Folder, c| f.children = c,
            ))
    }
}

// ---
// Conditional inclusion
// ---

#[derive(Debug, Default)]
pub struct Profile {
    pub name: String,
    pub nickname: Option<String>,
    pub admin: bool,
    pub secret: String,
    pub homepage: Option<String>,
    pub account: Option<Shared<Customer>>,
}

impl Resource for Profile {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("profile")
            .property(PropertyDescriptor::field(
                "name",
                |p: &Profile| p.name.clone(),
                |p: &mut Profile, n| p.name = n,
            ))
            .property(
                PropertyDescriptor::field(
                    "nickname",
                    |p: &Profile| p.nickname.clone(),
                    |p: &mut Profile, n| p.nickname = n,
                )
                .when(Condition::new(ConditionKind::NotNull)),
            )
            .property(PropertyDescriptor::field("admin", |p: &Profile| p.admin, |p: &mut Profile, a| p.admin = a))
            .property(
                PropertyDescriptor::field(
                    "secret",
                    |p: &Profile| p.secret.clone(),
                    |p: &mut Profile, s| p.secret = s,
                )
                .when(Condition::on("admin", ConditionKind::True)),
            )
            .property(
                PropertyDescriptor::field(
                    "homepage",
                    |p: &Profile| p.homepage.clone(),
                    |p: &mut Profile, h| p.homepage = h,
                )
                .link(LinkMeta::new(["homepage"]))
                .when(Condition::on("admin", ConditionKind::True)),
            )
            .property(
                PropertyDescriptor::field(
                    "account",
                    |p: &Profile| p.account.clone(),
                    |p: &mut Profile, a| p.account = a,
                )
                .sub_entity(SubEntityMeta::new().rel(["account"]))
                .when(Condition::on("admin", ConditionKind::True)),
            )
    }
}

/// Applies TRUE to a list, which is never classified.
#[derive(Debug, Default)]
pub struct Tagged {
    pub tags: Vec<String>,
}

impl Resource for Tagged {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("tagged").property(
            PropertyDescriptor::field("tags", |t: &Tagged| t.tags.clone(), |t: &mut Tagged, v| t.tags = v)
                .when(Condition::new(ConditionKind::True)),
        )
    }
}

#[derive(Debug, Default)]
pub struct Shelf {
    pub items: Vec<Shared<Tagged>>,
}

impl Resource for Shelf {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("shelf").property(PropertyDescriptor::field(
            "items",
            |s: &Shelf| s.items.clone(),
            |s: &mut Shelf, i| s.items = i,
        ))
    }
}

/// Declares a property without any accessor.
#[derive(Debug, Default)]
pub struct Opaque {
    pub value: i32,
}

impl Resource for Opaque {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("opaque").property(PropertyDescriptor::new("value", PropertyType::Integer))
    }
}

// ---
// Collections
// ---

#[derive(Debug, Default)]
pub struct Catalog {
    pub title: String,
    pub reviews: Shared<CollectionResource<Review>>,
}

impl Resource for Catalog {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("catalog")
            .property(PropertyDescriptor::field(
                "title",
                |c: &Catalog| c.title.clone(),
                |c: &mut Catalog, t| c.title = t,
            ))
            .property(PropertyDescriptor::field(
                "reviews",
                |c: &Catalog| c.reviews.clone(),
                |c: &mut Catalog, r| c.reviews = r,
            ))
    }
}

pub fn sample_reviews() -> CollectionResource<Review> {
    sample_video()
        .reviews
        .into_iter()
        .map(|review| {
            let item = review.borrow();
            item.clone()
        })
        .collect()
}
