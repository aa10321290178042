use anyhow::{Result, anyhow};
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::NaiveDate;
use diesel::{Connection, RunQueryDsl, insert_into, sql_query};
use rand::rngs::OsRng;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            customers::CustomerEntity, images::SeedImageEntity, invoices::SeedInvoiceEntity,
            reviews::SeedReviewEntity, users::UserEntity,
        },
        value_objects::{
            enums::{invoice_statuses::InvoiceStatus, review_statuses::ReviewStatus},
            image_owner::ImageOwner,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{customers, images, invoices, reviews, users},
    },
};

const SCHEMA_STATEMENTS: [&str; 6] = [
    r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#,
    "CREATE TABLE IF NOT EXISTS users (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS customers (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        image_url VARCHAR(255) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS invoices (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        customer_id UUID NOT NULL,
        amount INT NOT NULL,
        status VARCHAR(255) NOT NULL,
        date DATE NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS reviews (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        customer_id UUID NOT NULL,
        title VARCHAR(255) NOT NULL,
        status VARCHAR(255) NOT NULL,
        created_at DATE NOT NULL,
        updated_at DATE NOT NULL,
        next_part_id UUID DEFAULT NULL,
        text TEXT
    )",
    "CREATE TABLE IF NOT EXISTS images (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        document_id UUID NOT NULL,
        document_type VARCHAR(255) NOT NULL,
        url VARCHAR(2048) NOT NULL
    )",
];

const CUSTOMER_IDS: [Uuid; 6] = [
    Uuid::from_u128(0x3958dc9e_712f_4377_85e9_fec4b6a6442a),
    Uuid::from_u128(0x3958dc9e_742f_4377_85e9_fec4b6a6442a),
    Uuid::from_u128(0x3958dc9e_737f_4377_85e9_fec4b6a6442a),
    Uuid::from_u128(0x50ca3e18_62cd_11ee_8c99_0242ac120002),
    Uuid::from_u128(0x3958dc9e_787f_4377_85e9_fec4b6a6442a),
    Uuid::from_u128(0x76d65c26_f784_44a2_ac19_586678f7c2f2),
];

const REVIEW_IDS: [Uuid; 4] = [
    Uuid::from_u128(0x9a1f6c2e_0b7d_4c38_9f2a_1d0e5b7a3c01),
    Uuid::from_u128(0x9a1f6c2e_0b7d_4c38_9f2a_1d0e5b7a3c02),
    Uuid::from_u128(0x9a1f6c2e_0b7d_4c38_9f2a_1d0e5b7a3c03),
    Uuid::from_u128(0x9a1f6c2e_0b7d_4c38_9f2a_1d0e5b7a3c04),
];

/// Plain-text credentials; the password is hashed before it is written.
pub struct SeedUser {
    pub id: Uuid,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

pub struct SeedData {
    pub users: Vec<SeedUser>,
    pub customers: Vec<CustomerEntity>,
    pub invoices: Vec<SeedInvoiceEntity>,
    pub reviews: Vec<SeedReviewEntity>,
    pub images: Vec<SeedImageEntity>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SeedReport {
    pub users: usize,
    pub customers: usize,
    pub invoices: usize,
    pub reviews: usize,
    pub images: usize,
}

fn day(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid seed date {year}-{month}-{day}"))
}

fn customer(id: Uuid, name: &str, email: &str, image_url: &str) -> CustomerEntity {
    CustomerEntity {
        id,
        name: name.to_string(),
        email: email.to_string(),
        image_url: image_url.to_string(),
    }
}

fn invoice(
    index: u128,
    customer_id: Uuid,
    amount: i32,
    status: InvoiceStatus,
    date: NaiveDate,
) -> SeedInvoiceEntity {
    SeedInvoiceEntity {
        id: Uuid::from_u128(0x5f2b8c44_1e0a_4d6b_8f3e_000000000000 + index),
        customer_id,
        amount,
        status: status.to_string(),
        date,
    }
}

pub fn seed_data() -> Result<SeedData> {
    let users = vec![SeedUser {
        id: Uuid::from_u128(0x410544b2_4001_4271_9855_fec4b6a6442a),
        name: "User",
        email: "user@nextmail.com",
        password: "123456",
    }];

    let customers = vec![
        customer(CUSTOMER_IDS[0], "Delba de Oliveira", "delba@oliveira.com", "/customers/delba-de-oliveira.png"),
        customer(CUSTOMER_IDS[1], "Lee Robinson", "lee@robinson.com", "/customers/lee-robinson.png"),
        customer(CUSTOMER_IDS[2], "Hector Simpson", "hector@simpson.com", "/customers/hector-simpson.png"),
        customer(CUSTOMER_IDS[3], "Steven Tey", "steven@tey.com", "/customers/steven-tey.png"),
        customer(CUSTOMER_IDS[4], "Steph Dietz", "steph@dietz.com", "/customers/steph-dietz.png"),
        customer(CUSTOMER_IDS[5], "Michael Novotny", "michael@novotny.com", "/customers/michael-novotny.png"),
    ];

    let invoices = vec![
        invoice(1, CUSTOMER_IDS[0], 15795, InvoiceStatus::Pending, day(2022, 12, 6)?),
        invoice(2, CUSTOMER_IDS[1], 20348, InvoiceStatus::Pending, day(2022, 11, 14)?),
        invoice(3, CUSTOMER_IDS[4], 3040, InvoiceStatus::Paid, day(2022, 10, 29)?),
        invoice(4, CUSTOMER_IDS[3], 44800, InvoiceStatus::Paid, day(2023, 9, 10)?),
        invoice(5, CUSTOMER_IDS[5], 34577, InvoiceStatus::Pending, day(2023, 8, 5)?),
        invoice(6, CUSTOMER_IDS[2], 54246, InvoiceStatus::Pending, day(2023, 7, 16)?),
        invoice(7, CUSTOMER_IDS[0], 666, InvoiceStatus::Pending, day(2023, 6, 27)?),
        invoice(8, CUSTOMER_IDS[3], 32545, InvoiceStatus::Paid, day(2023, 6, 9)?),
        invoice(9, CUSTOMER_IDS[4], 1250, InvoiceStatus::Paid, day(2023, 6, 17)?),
        invoice(10, CUSTOMER_IDS[5], 8546, InvoiceStatus::Paid, day(2023, 6, 7)?),
    ];

    let reviews = vec![
        SeedReviewEntity {
            id: REVIEW_IDS[0],
            customer_id: CUSTOMER_IDS[0],
            title: "Great ride".to_string(),
            status: ReviewStatus::Published.to_string(),
            created_at: day(2023, 5, 2)?,
            updated_at: day(2023, 5, 4)?,
            next_part_id: None,
            text: Some("Smooth trip across the valley, no complaints.".to_string()),
        },
        SeedReviewEntity {
            id: REVIEW_IDS[1],
            customer_id: CUSTOMER_IDS[1],
            title: "Late pickup".to_string(),
            status: ReviewStatus::Pending.to_string(),
            created_at: day(2023, 6, 11)?,
            updated_at: day(2023, 6, 11)?,
            next_part_id: None,
            text: Some("Driver arrived twenty minutes late.".to_string()),
        },
        SeedReviewEntity {
            id: REVIEW_IDS[2],
            customer_id: CUSTOMER_IDS[3],
            title: "Second trip".to_string(),
            status: ReviewStatus::Archived.to_string(),
            created_at: day(2023, 7, 1)?,
            updated_at: day(2023, 7, 3)?,
            next_part_id: None,
            text: Some("Same route as last time, still pleasant.".to_string()),
        },
        SeedReviewEntity {
            id: REVIEW_IDS[3],
            customer_id: CUSTOMER_IDS[4],
            title: "Mountain loop".to_string(),
            status: ReviewStatus::Published.to_string(),
            created_at: day(2023, 8, 20)?,
            updated_at: day(2023, 8, 22)?,
            next_part_id: None,
            text: Some("Steep but the views were worth it.".to_string()),
        },
    ];

    let images = vec![
        seed_image(1, ImageOwner::Review(REVIEW_IDS[0]), "/uploads/seed-great-ride.png"),
        seed_image(2, ImageOwner::Review(REVIEW_IDS[3]), "/uploads/seed-mountain-loop.png"),
    ];

    Ok(SeedData {
        users,
        customers,
        invoices,
        reviews,
        images,
    })
}

fn seed_image(index: u128, owner: ImageOwner, url: &str) -> SeedImageEntity {
    SeedImageEntity {
        id: Uuid::from_u128(0x7c3e1d90_4a5b_4e6f_9a8b_000000000000 + index),
        document_id: owner.document_id(),
        document_type: owner.document_type().to_string(),
        url: url.to_string(),
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash seed password: {err}"))?;
    Ok(hash.to_string())
}

/// Creates the schema and loads `data` in one transaction. Rows that already exist are skipped.
pub fn run(db_pool: &PgPoolSquad, data: SeedData) -> Result<SeedReport> {
    let users = data
        .users
        .iter()
        .map(|user| {
            Ok(UserEntity {
                id: user.id,
                name: user.name.to_string(),
                email: user.email.to_string(),
                password: hash_password(user.password)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut conn = db_pool.get()?;

    let report = conn.transaction::<SeedReport, diesel::result::Error, _>(|tx| {
        for statement in SCHEMA_STATEMENTS {
            sql_query(statement).execute(tx)?;
        }

        let report = SeedReport {
            users: insert_into(users::table)
                .values(&users)
                .on_conflict_do_nothing()
                .execute(tx)?,
            customers: insert_into(customers::table)
                .values(&data.customers)
                .on_conflict_do_nothing()
                .execute(tx)?,
            invoices: insert_into(invoices::table)
                .values(&data.invoices)
                .on_conflict_do_nothing()
                .execute(tx)?,
            reviews: insert_into(reviews::table)
                .values(&data.reviews)
                .on_conflict_do_nothing()
                .execute(tx)?,
            images: insert_into(images::table)
                .values(&data.images)
                .on_conflict_do_nothing()
                .execute(tx)?,
        };

        Ok(report)
    })?;

    info!(
        users = report.users,
        customers = report.customers,
        invoices = report.invoices,
        reviews = report.reviews,
        images = report.images,
        "seed: database seeded"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};
    use std::collections::HashSet;

    #[test]
    fn seed_rows_reference_seeded_customers() {
        let data = seed_data().unwrap();
        let customer_ids: HashSet<Uuid> = data.customers.iter().map(|c| c.id).collect();

        assert!(data.invoices.iter().all(|i| customer_ids.contains(&i.customer_id)));
        assert!(data.reviews.iter().all(|r| customer_ids.contains(&r.customer_id)));
    }

    #[test]
    fn seed_ids_are_unique() {
        let data = seed_data().unwrap();
        let invoice_ids: HashSet<Uuid> = data.invoices.iter().map(|i| i.id).collect();
        let image_ids: HashSet<Uuid> = data.images.iter().map(|i| i.id).collect();

        assert_eq!(invoice_ids.len(), data.invoices.len());
        assert_eq!(image_ids.len(), data.images.len());
    }

    #[test]
    fn seeded_images_belong_to_seeded_reviews() {
        let data = seed_data().unwrap();
        let review_ids: HashSet<Uuid> = data.reviews.iter().map(|r| r.id).collect();

        for image in &data.images {
            assert_eq!(
                image.document_type,
                ImageOwner::Review(image.document_id).document_type()
            );
            assert!(review_ids.contains(&image.document_id));
        }
    }

    #[test]
    fn seed_passwords_are_hashed() {
        let hash = hash_password("123456").unwrap();
        assert_ne!(hash, "123456");
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"123456", &parsed).is_ok());
    }

    #[test]
    fn every_hash_gets_a_fresh_salt() {
        let first = hash_password("123456").unwrap();
        let second = hash_password("123456").unwrap();

        assert_ne!(first, second);
        assert_ne!(
            PasswordHash::new(&first).unwrap().salt,
            PasswordHash::new(&second).unwrap().salt
        );
    }
}
