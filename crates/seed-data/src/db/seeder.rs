//! Transactional database seeding.

use esports::{Database, DbError};
use esports::schema::TABLES_IN_DEPENDENCY_ORDER;
use sqlx::error::ErrorKind;
use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use time::Date;
use tracing::{debug, info, warn};

use crate::builders::{Dataset, DatasetBuilder, SeedReport};
use crate::config::SeedConfig;
use crate::sources::FakeSource;

#[derive(Debug, Error)]
pub enum SeedError {
    /// A unique, not-null or check constraint rejected a row.
    #[error("Constraint violation ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// A row referenced a parent that does not exist.
    #[error("Referential error ({constraint}): {message}")]
    ReferentialError { constraint: String, message: String },

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] DbError),
}

impl From<sqlx::Error> for SeedError {
    fn from(err: sqlx::Error) -> Self {
        let Some(db_err) = err.as_database_error() else {
            return SeedError::Database(err);
        };

        let kind = db_err.kind();
        let constraint = db_err.constraint().unwrap_or_default().to_string();
        let message = db_err.message().to_string();

        match kind {
            ErrorKind::UniqueViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => SeedError::ConstraintViolation {
                constraint,
                message,
            },
            ErrorKind::ForeignKeyViolation => SeedError::ReferentialError {
                constraint,
                message,
            },
            _ => SeedError::Database(err),
        }
    }
}

/// Database seeder for inserting generated datasets.
pub struct Seeder {
    pool: PgPool,
    batch_size: usize,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            batch_size: 50,
        }
    }

    /// Sets how many rows go between progress log lines.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Applies pending migrations and checks the live foreign keys against
    /// the declared deletion policies.
    pub async fn prepare_schema(&self) -> Result<(), SeedError> {
        esports::migrate(&self.pool).await?;
        Database::new(self.pool.clone()).verify_relations().await?;
        Ok(())
    }

    /// Generates a dataset from `config` and seeds it.
    pub async fn run(
        &self,
        config: &SeedConfig,
        faker: &mut impl FakeSource,
        today: Date,
    ) -> Result<SeedReport, SeedError> {
        let builder = DatasetBuilder::from_config(config);
        let mut rng = builder.rng();
        let dataset = builder.build_data(faker, &mut rng, today);

        info!(
            "Generated dataset for N={} (seed {}): {} rows",
            config.count,
            config.seed,
            dataset.report().total()
        );

        self.seed(&dataset).await
    }

    /// Replaces the contents of every table with `dataset`.
    ///
    /// Runs in one transaction. On any error the transaction is dropped and
    /// rolled back, so the previous rows, deletions included, are untouched.
    pub async fn seed(&self, dataset: &Dataset) -> Result<SeedReport, SeedError> {
        let mut tx = self.pool.begin().await?;

        self.clear_all(&mut tx).await?;

        let report = SeedReport {
            users: self.seed_users(&mut tx, dataset).await?,
            profiles: self.seed_profiles(&mut tx, dataset).await?,
            games: self.seed_games(&mut tx, dataset).await?,
            sponsors: self.seed_sponsors(&mut tx, dataset).await?,
            teams: self.seed_teams(&mut tx, dataset).await?,
            contracts: self.seed_contracts(&mut tx, dataset).await?,
            players: self.seed_players(&mut tx, dataset).await?,
            stats: self.seed_stats(&mut tx, dataset).await?,
            tournaments: self.seed_tournaments(&mut tx, dataset).await?,
            participations: self.seed_participations(&mut tx, dataset).await?,
        };

        tx.commit().await?;

        info!("Seed committed: {} rows", report.total());
        Ok(report)
    }

    /// Deletes every row, children first.
    async fn clear_all(&self, conn: &mut PgConnection) -> Result<(), SeedError> {
        for table in TABLES_IN_DEPENDENCY_ORDER.iter().rev() {
            let result = sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *conn)
                .await?;
            debug!("Cleared {} rows from {}", result.rows_affected(), table);
        }
        Ok(())
    }

    fn log_progress(&self, entity: &str, done: usize, total: usize) {
        if done % self.batch_size == 0 && done < total {
            info!("  Seeded {}/{} {}", done, total, entity);
        }
    }

    async fn seed_users(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} users...", data.users.len());

        for (i, user) in data.users.iter().enumerate() {
            // registered_on is left to the column default
            sqlx::query("INSERT INTO users (id, name, email, is_active) VALUES ($1, $2, $3, $4)")
                .bind(user.id)
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.is_active)
                .execute(&mut *conn)
                .await?;
            self.log_progress("users", i + 1, data.users.len());
        }

        Ok(data.users.len())
    }

    async fn seed_profiles(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} profiles...", data.profiles.len());

        for (i, profile) in data.profiles.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO profiles (id, user_id, biography, country, birth_date, avatar)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(profile.id)
            .bind(profile.user_id)
            .bind(&profile.biography)
            .bind(&profile.country)
            .bind(profile.birth_date)
            .bind(&profile.avatar)
            .execute(&mut *conn)
            .await?;
            self.log_progress("profiles", i + 1, data.profiles.len());
        }

        Ok(data.profiles.len())
    }

    async fn seed_games(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} games...", data.games.len());

        for game in &data.games {
            sqlx::query(
                r#"
                INSERT INTO games (id, name, genre, developer, released_on)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(game.id)
            .bind(&game.name)
            .bind(&game.genre)
            .bind(&game.developer)
            .bind(game.released_on)
            .execute(&mut *conn)
            .await?;
        }

        Ok(data.games.len())
    }

    async fn seed_sponsors(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} sponsors...", data.sponsors.len());

        for sponsor in &data.sponsors {
            sqlx::query(
                r#"
                INSERT INTO sponsors (id, name, industry, country, annual_budget)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(sponsor.id)
            .bind(&sponsor.name)
            .bind(&sponsor.industry)
            .bind(&sponsor.country)
            .bind(sponsor.annual_budget)
            .execute(&mut *conn)
            .await?;
        }

        Ok(data.sponsors.len())
    }

    async fn seed_teams(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} teams...", data.teams.len());

        for team in &data.teams {
            sqlx::query(
                r#"
                INSERT INTO teams (id, name, founded_on, country, budget)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(team.id)
            .bind(&team.name)
            .bind(team.founded_on)
            .bind(&team.country)
            .bind(team.budget)
            .execute(&mut *conn)
            .await?;
        }

        Ok(data.teams.len())
    }

    async fn seed_contracts(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} contracts...", data.contracts.len());

        for (i, contract) in data.contracts.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO contracts (id, team_id, sponsor_id, starts_on, ends_on, amount)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(contract.id)
            .bind(contract.team_id)
            .bind(contract.sponsor_id)
            .bind(contract.starts_on)
            .bind(contract.ends_on)
            .bind(contract.amount)
            .execute(&mut *conn)
            .await?;
            self.log_progress("contracts", i + 1, data.contracts.len());
        }

        Ok(data.contracts.len())
    }

    async fn seed_players(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} players...", data.players.len());

        for (i, player) in data.players.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO players (id, user_id, team_id, nickname, role, nationality)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(player.id)
            .bind(player.user_id)
            .bind(player.team_id)
            .bind(&player.nickname)
            .bind(&player.role)
            .bind(&player.nationality)
            .execute(&mut *conn)
            .await?;
            self.log_progress("players", i + 1, data.players.len());
        }

        Ok(data.players.len())
    }

    async fn seed_stats(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} player stats...", data.stats.len());

        for (i, stats) in data.stats.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO player_stats (id, player_id, matches_played, wins, losses, average_kda)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(stats.id)
            .bind(stats.player_id)
            .bind(stats.matches_played)
            .bind(stats.wins)
            .bind(stats.losses)
            .bind(stats.average_kda)
            .execute(&mut *conn)
            .await?;
            self.log_progress("player stats", i + 1, data.stats.len());
        }

        Ok(data.stats.len())
    }

    async fn seed_tournaments(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} tournaments...", data.tournaments.len());

        for tournament in &data.tournaments {
            sqlx::query(
                r#"
                INSERT INTO tournaments (id, name, game_id, starts_on, ends_on, total_prize)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(tournament.id)
            .bind(&tournament.name)
            .bind(tournament.game_id)
            .bind(tournament.starts_on)
            .bind(tournament.ends_on)
            .bind(tournament.total_prize)
            .execute(&mut *conn)
            .await?;
        }

        Ok(data.tournaments.len())
    }

    /// Inserts participations, skipping pairs that already exist.
    ///
    /// Returns the number of rows actually inserted.
    async fn seed_participations(
        &self,
        conn: &mut PgConnection,
        data: &Dataset,
    ) -> Result<usize, SeedError> {
        info!("Seeding {} participations...", data.participations.len());

        let mut inserted = 0;
        for (i, participation) in data.participations.iter().enumerate() {
            let result = sqlx::query(
                r#"
                INSERT INTO participations (id, team_id, tournament_id, final_position, points)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (team_id, tournament_id) DO NOTHING
                "#,
            )
            .bind(participation.id)
            .bind(participation.team_id)
            .bind(participation.tournament_id)
            .bind(participation.final_position)
            .bind(participation.points)
            .execute(&mut *conn)
            .await?;

            if result.rows_affected() == 0 {
                warn!(
                    "Participation of team {} in tournament {} already exists, skipped",
                    participation.team_id, participation.tournament_id
                );
            } else {
                inserted += 1;
            }
            self.log_progress("participations", i + 1, data.participations.len());
        }

        Ok(inserted)
    }
}
