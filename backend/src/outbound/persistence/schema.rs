//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep in step with the SQL migrations; `diesel print-schema` against a
//! migrated database regenerates the definitions.

diesel::table! {
    /// Registered users, created through `POST /api/users`.
    users (id) {
        id -> Int8,
        #[max_length = 100]
        first_name -> Varchar,
        #[max_length = 100]
        last_name -> Varchar,
        birthday -> Nullable<Date>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only expense log. `id` gives the storage order.
    expenses (id) {
        id -> Int8,
        user_id -> Int8,
        #[max_length = 64]
        category -> Varchar,
        amount -> Numeric,
        description -> Text,
        occurred_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Write-once monthly report snapshots, unique per (user_id, year, month).
    reports (id) {
        id -> Int8,
        user_id -> Int8,
        year -> Int4,
        month -> Int4,
        costs -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(expenses -> users (user_id));
diesel::joinable!(reports -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, expenses, reports);
