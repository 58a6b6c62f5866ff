//! Declared deletion policies for every foreign key in the schema.
//!
//! PostgreSQL enforces these natively through the migrations; this table is
//! the source the migrations are checked against (see
//! [`Database::verify_relations`](crate::database::Database::verify_relations)).

/// What happens to referencing rows when the referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

impl OnDelete {
    /// Returns the `information_schema` delete rule string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OnDelete::Cascade => "CASCADE",
            OnDelete::SetNull => "SET NULL",
        }
    }
}

/// How many rows may reference the same parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    ManyToOne,
}

/// A single foreign key: `table.column -> references(id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub table: &'static str,
    pub column: &'static str,
    pub references: &'static str,
    pub cardinality: Cardinality,
    pub on_delete: OnDelete,
}

const fn relation(
    table: &'static str,
    column: &'static str,
    references: &'static str,
    cardinality: Cardinality,
    on_delete: OnDelete,
) -> Relation {
    Relation {
        table,
        column,
        references,
        cardinality,
        on_delete,
    }
}

use Cardinality::{ManyToOne, OneToOne};
use OnDelete::{Cascade, SetNull};

pub const RELATIONS: &[Relation] = &[
    relation("profiles", "user_id", "users", OneToOne, Cascade),
    relation("players", "user_id", "users", OneToOne, Cascade),
    relation("players", "team_id", "teams", ManyToOne, SetNull),
    relation("player_games", "player_id", "players", ManyToOne, Cascade),
    relation("player_games", "game_id", "games", ManyToOne, Cascade),
    relation("tournaments", "game_id", "games", ManyToOne, Cascade),
    relation("contracts", "team_id", "teams", ManyToOne, Cascade),
    relation("contracts", "sponsor_id", "sponsors", ManyToOne, Cascade),
    relation("player_stats", "player_id", "players", OneToOne, Cascade),
    relation("participations", "team_id", "teams", ManyToOne, Cascade),
    relation("participations", "tournament_id", "tournaments", ManyToOne, Cascade),
];

/// Every managed table, ordered so that each table comes after all tables it references.
pub const TABLES_IN_DEPENDENCY_ORDER: &[&str] = &[
    "users",
    "profiles",
    "games",
    "sponsors",
    "teams",
    "contracts",
    "players",
    "player_games",
    "player_stats",
    "tournaments",
    "participations",
];

/// Returns the declared relation for `table.column`, if any.
pub fn relation_for(table: &str, column: &str) -> Option<&'static Relation> {
    RELATIONS
        .iter()
        .find(|r| r.table == table && r.column == column)
}
