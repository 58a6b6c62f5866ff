use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::DbError;
use crate::models::{
    Entity, Game, Participation, Player, PlayerStats, Profile, Sponsor, Team, Tournament,
};
use crate::schema::{RELATIONS, TABLES_IN_DEPENDENCY_ORDER};

/// Applies the embedded migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Migrations applied");
    Ok(())
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list<T: Entity>(&self) -> Result<Vec<T>, DbError> {
        let sql = format!("SELECT * FROM {} ORDER BY id", T::TABLE);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get<T: Entity>(&self, id: Uuid) -> Result<Option<T>, DbError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Inserts a new row with every column, `id` included.
    pub async fn insert<T: Entity>(&self, row: &T) -> Result<(), DbError> {
        let placeholders: Vec<String> = (1..=T::COLUMNS.len())
            .map(|i| format!("${i}"))
            .collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders.join(", ")
        );
        row.bind_columns(sqlx::query(&sql))
            .execute(&self.pool)
            .await?;

        debug!("Inserted into {}", T::TABLE);
        Ok(())
    }

    /// Overwrites every non-key column of the row with the same `id`.
    pub async fn update<T: Entity>(&self, row: &T) -> Result<(), DbError> {
        let assignments: Vec<String> = T::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, col)| format!("{col} = ${}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = $1",
            T::TABLE,
            assignments.join(", ")
        );
        let result = row
            .bind_columns(sqlx::query(&sql))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        debug!("Updated {}", T::TABLE);
        Ok(())
    }

    /// Deletes a row; dependent rows follow the declared deletion policies.
    pub async fn delete<T: Entity>(&self, id: Uuid) -> Result<(), DbError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        debug!("Deleted {} from {}", id, T::TABLE);
        Ok(())
    }

    pub async fn count<T: Entity>(&self) -> Result<i64, DbError> {
        self.count_table(T::TABLE).await
    }

    /// Row counts for every managed table, in dependency order.
    pub async fn table_counts(&self) -> Result<Vec<(&'static str, i64)>, DbError> {
        let mut counts = Vec::with_capacity(TABLES_IN_DEPENDENCY_ORDER.len());
        for table in TABLES_IN_DEPENDENCY_ORDER {
            counts.push((*table, self.count_table(table).await?));
        }
        Ok(counts)
    }

    async fn count_table(&self, table: &str) -> Result<i64, DbError> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn profile_of_user(&self, user_id: Uuid) -> Result<Option<Profile>, DbError> {
        let profile = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    pub async fn player_of_user(&self, user_id: Uuid) -> Result<Option<Player>, DbError> {
        let player = sqlx::query_as("SELECT * FROM players WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(player)
    }

    pub async fn stats_of_player(&self, player_id: Uuid) -> Result<Option<PlayerStats>, DbError> {
        let stats = sqlx::query_as("SELECT * FROM player_stats WHERE player_id = $1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stats)
    }

    pub async fn players_of_team(&self, team_id: Uuid) -> Result<Vec<Player>, DbError> {
        let players = sqlx::query_as(
            r#"
            SELECT * FROM players
            WHERE team_id = $1
            ORDER BY nickname
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(players)
    }

    /// Sponsors with at least one contract with the team.
    pub async fn sponsors_of_team(&self, team_id: Uuid) -> Result<Vec<Sponsor>, DbError> {
        let sponsors = sqlx::query_as(
            r#"
            SELECT DISTINCT s.*
            FROM sponsors s
            JOIN contracts c ON c.sponsor_id = s.id
            WHERE c.team_id = $1
            ORDER BY s.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sponsors)
    }

    pub async fn teams_of_sponsor(&self, sponsor_id: Uuid) -> Result<Vec<Team>, DbError> {
        let teams = sqlx::query_as(
            r#"
            SELECT DISTINCT t.*
            FROM teams t
            JOIN contracts c ON c.team_id = t.id
            WHERE c.sponsor_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(sponsor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }

    pub async fn tournaments_of_team(&self, team_id: Uuid) -> Result<Vec<Tournament>, DbError> {
        let tournaments = sqlx::query_as(
            r#"
            SELECT t.*
            FROM tournaments t
            JOIN participations p ON p.tournament_id = t.id
            WHERE p.team_id = $1
            ORDER BY t.starts_on
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tournaments)
    }

    /// Participating teams, best final position first.
    pub async fn teams_of_tournament(&self, tournament_id: Uuid) -> Result<Vec<Team>, DbError> {
        let teams = sqlx::query_as(
            r#"
            SELECT t.*
            FROM teams t
            JOIN participations p ON p.team_id = t.id
            WHERE p.tournament_id = $1
            ORDER BY p.final_position
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }

    /// Participation rows of a tournament ordered by final position.
    pub async fn standings(&self, tournament_id: Uuid) -> Result<Vec<Participation>, DbError> {
        let standings = sqlx::query_as(
            r#"
            SELECT * FROM participations
            WHERE tournament_id = $1
            ORDER BY final_position
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(standings)
    }

    pub async fn tournaments_of_game(&self, game_id: Uuid) -> Result<Vec<Tournament>, DbError> {
        let tournaments = sqlx::query_as(
            r#"
            SELECT * FROM tournaments
            WHERE game_id = $1
            ORDER BY starts_on
            "#,
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tournaments)
    }

    pub async fn games_of_player(&self, player_id: Uuid) -> Result<Vec<Game>, DbError> {
        let games = sqlx::query_as(
            r#"
            SELECT g.*
            FROM games g
            JOIN player_games pg ON pg.game_id = g.id
            WHERE pg.player_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(games)
    }

    pub async fn players_of_game(&self, game_id: Uuid) -> Result<Vec<Player>, DbError> {
        let players = sqlx::query_as(
            r#"
            SELECT p.*
            FROM players p
            JOIN player_games pg ON pg.player_id = p.id
            WHERE pg.game_id = $1
            ORDER BY p.nickname
            "#,
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(players)
    }

    /// "Profile of {user name}".
    pub async fn profile_label(&self, profile_id: Uuid) -> Result<String, DbError> {
        let name: Option<String> = sqlx::query_scalar(
            r#"
            SELECT u.name
            FROM profiles pr
            JOIN users u ON u.id = pr.user_id
            WHERE pr.id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;
        let name = name.ok_or(DbError::NotFound)?;
        Ok(format!("Profile of {name}"))
    }

    /// "Contract {sponsor name} - {team name}".
    pub async fn contract_label(&self, contract_id: Uuid) -> Result<String, DbError> {
        let names: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT s.name, t.name
            FROM contracts c
            JOIN sponsors s ON s.id = c.sponsor_id
            JOIN teams t ON t.id = c.team_id
            WHERE c.id = $1
            "#,
        )
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await?;
        let (sponsor, team) = names.ok_or(DbError::NotFound)?;
        Ok(format!("Contract {sponsor} - {team}"))
    }

    /// "Stats of {player nickname}".
    pub async fn stats_label(&self, stats_id: Uuid) -> Result<String, DbError> {
        let nickname: Option<String> = sqlx::query_scalar(
            r#"
            SELECT p.nickname
            FROM player_stats ps
            JOIN players p ON p.id = ps.player_id
            WHERE ps.id = $1
            "#,
        )
        .bind(stats_id)
        .fetch_optional(&self.pool)
        .await?;
        let nickname = nickname.ok_or(DbError::NotFound)?;
        Ok(format!("Stats of {nickname}"))
    }

    /// "{team name} in {tournament name}".
    pub async fn participation_label(&self, participation_id: Uuid) -> Result<String, DbError> {
        let names: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT t.name, tr.name
            FROM participations p
            JOIN teams t ON t.id = p.team_id
            JOIN tournaments tr ON tr.id = p.tournament_id
            WHERE p.id = $1
            "#,
        )
        .bind(participation_id)
        .fetch_optional(&self.pool)
        .await?;
        let (team, tournament) = names.ok_or(DbError::NotFound)?;
        Ok(format!("{team} in {tournament}"))
    }

    /// Links a player to a game. Linking twice is a no-op.
    pub async fn add_player_game(&self, player_id: Uuid, game_id: Uuid) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO player_games (player_id, game_id)
            VALUES ($1, $2)
            ON CONFLICT (player_id, game_id) DO NOTHING
            "#,
        )
        .bind(player_id)
        .bind(game_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Checks the live foreign keys against [`RELATIONS`].
    pub async fn verify_relations(&self) -> Result<(), DbError> {
        let live: Vec<(String, String, String, String)> = sqlx::query_as(
            r#"
            SELECT kcu.table_name::text, kcu.column_name::text,
                   ccu.table_name::text, rc.delete_rule::text
            FROM information_schema.referential_constraints rc
            JOIN information_schema.key_column_usage kcu
              ON kcu.constraint_name = rc.constraint_name
             AND kcu.constraint_schema = rc.constraint_schema
            JOIN information_schema.constraint_column_usage ccu
              ON ccu.constraint_name = rc.unique_constraint_name
             AND ccu.constraint_schema = rc.unique_constraint_schema
            WHERE rc.constraint_schema = current_schema()
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut problems = Vec::new();

        for rel in RELATIONS {
            match live
                .iter()
                .find(|(table, column, _, _)| table == rel.table && column == rel.column)
            {
                None => problems.push(format!("{}.{} has no foreign key", rel.table, rel.column)),
                Some((_, _, references, rule)) => {
                    if references != rel.references {
                        problems.push(format!(
                            "{}.{} references {references}, expected {}",
                            rel.table, rel.column, rel.references
                        ));
                    }
                    if rule != rel.on_delete.as_str() {
                        problems.push(format!(
                            "{}.{} deletes with {rule}, expected {}",
                            rel.table,
                            rel.column,
                            rel.on_delete.as_str()
                        ));
                    }
                }
            }
        }

        for (table, column, _, _) in &live {
            if !RELATIONS
                .iter()
                .any(|r| r.table == table && r.column == column)
            {
                problems.push(format!("{table}.{column} is not declared"));
            }
        }

        if problems.is_empty() {
            debug!("Verified {} relations", RELATIONS.len());
            Ok(())
        } else {
            Err(DbError::SchemaDrift(problems.join("; ")))
        }
    }
}
