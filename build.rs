//! Build script for embedded SQL migrations.
//!
//! `sqlx::migrate!` embeds the migration files at compile time, so cargo has
//! to rebuild whenever a file under `data/sql/sqlite` changes.

fn main() {
    println!("cargo:rerun-if-changed=data/sql/sqlite");
}
