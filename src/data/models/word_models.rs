use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::words;

/// Catalog entry an item id resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = words)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Word {
    #[diesel(column_name = word_id)]
    pub id: i32,              // Catalog word ID, doubles as item ID
    pub simplified: String,   // Simplified Chinese
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traditional: Option<String>, // Traditional Chinese
    pub pinyin: String,       // Pinyin pronunciation
    pub definition: String,   // English definition(s)
    pub language: String,     // Filterable language tag
    pub difficulty: i32,      // Filterable difficulty level
}

/// Catalog row used when seeding or refreshing a word
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = words)]
#[diesel(primary_key(word_id))]
#[diesel(treat_none_as_null = true)]
pub struct NewWord<'a> {
    pub word_id: i32,
    pub simplified: &'a str,
    pub traditional: Option<&'a str>,
    pub pinyin: &'a str,
    pub definition: &'a str,
    pub language: &'a str,
    pub difficulty: i32,
}
