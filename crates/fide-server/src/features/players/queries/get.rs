use fide_common::PlayerRecord;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPlayerQuery {
    pub fide_id: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetPlayerError {
    #[error("Player {0} not found")]
    NotFound(u64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const SELECT_PLAYER_SQL: &str = r#"
    SELECT name, country, sex,
           title, w_title, o_title, foa_title,
           rating, games, k,
           rapid_rating, rapid_games, rapid_k,
           blitz_rating, blitz_games, blitz_k,
           birthday, flag
    FROM player
    WHERE fideid = ?
"#;

/// Lookup service: one player by primary key
#[tracing::instrument(skip(pool))]
pub async fn get_player(
    pool: &SqlitePool,
    query: GetPlayerQuery,
) -> Result<PlayerRecord, GetPlayerError> {
    // Ids beyond the store's integer range cannot have a row
    let Ok(key) = i64::try_from(query.fide_id) else {
        return Err(GetPlayerError::NotFound(query.fide_id));
    };

    let row = sqlx::query_as::<_, PlayerRow>(SELECT_PLAYER_SQL)
        .bind(key)
        .fetch_optional(pool)
        .await?
        .ok_or(GetPlayerError::NotFound(query.fide_id))?;

    Ok(row.into_record(query.fide_id))
}

#[derive(Debug, sqlx::FromRow)]
struct PlayerRow {
    name: Option<String>,
    country: Option<String>,
    sex: Option<String>,
    title: Option<String>,
    w_title: Option<String>,
    o_title: Option<String>,
    foa_title: Option<String>,
    rating: Option<i64>,
    games: Option<i64>,
    k: Option<i64>,
    rapid_rating: Option<i64>,
    rapid_games: Option<i64>,
    rapid_k: Option<i64>,
    blitz_rating: Option<i64>,
    blitz_games: Option<i64>,
    blitz_k: Option<i64>,
    birthday: Option<i64>,
    flag: Option<String>,
}

impl PlayerRow {
    fn into_record(self, fide_id: u64) -> PlayerRecord {
        PlayerRecord {
            fide_id,
            name: self.name.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            sex: self.sex.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            w_title: self.w_title.unwrap_or_default(),
            o_title: self.o_title.unwrap_or_default(),
            foa_title: self.foa_title.unwrap_or_default(),
            rating: narrow(self.rating),
            games: narrow(self.games),
            k: narrow(self.k),
            rapid_rating: narrow(self.rapid_rating),
            rapid_games: narrow(self.rapid_games),
            rapid_k: narrow(self.rapid_k),
            blitz_rating: narrow(self.blitz_rating),
            blitz_games: narrow(self.blitz_games),
            blitz_k: narrow(self.blitz_k),
            birthday: narrow(self.birthday),
            flag: self.flag.unwrap_or_default(),
        }
    }
}

/// NULL and out-of-range integers read as the field default
fn narrow<T: TryFrom<i64> + Default>(value: Option<i64>) -> T {
    value.and_then(|v| T::try_from(v).ok()).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    async fn insert_carlsen(pool: &SqlitePool) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO player (fideid, name, country, sex, title, w_title, o_title, foa_title, \
             rating, games, k, rapid_rating, rapid_games, rapid_k, \
             blitz_rating, blitz_games, blitz_k, birthday, flag) \
             VALUES (1503014, 'Carlsen, Magnus', 'NOR', 'M', 'GM', '', '', '', \
             2830, 9, 10, 2824, 0, 20, 2886, 0, 20, 1990, '')",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_get_existing_player(pool: SqlitePool) -> sqlx::Result<()> {
        insert_carlsen(&pool).await?;

        let player = get_player(&pool, GetPlayerQuery { fide_id: 1503014 }).await.unwrap();

        assert_eq!(
            player,
            PlayerRecord {
                fide_id: 1503014,
                name: "Carlsen, Magnus".to_string(),
                country: "NOR".to_string(),
                sex: "M".to_string(),
                title: "GM".to_string(),
                rating: 2830,
                games: 9,
                k: 10,
                rapid_rating: 2824,
                rapid_k: 20,
                blitz_rating: 2886,
                blitz_k: 20,
                birthday: 1990,
                ..Default::default()
            }
        );
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_null_columns_read_as_defaults(pool: SqlitePool) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO player (fideid, name) VALUES (42, 'Sparse')")
            .execute(&pool)
            .await?;

        let player = get_player(&pool, GetPlayerQuery { fide_id: 42 }).await.unwrap();

        assert_eq!(player.name, "Sparse");
        assert_eq!(player.country, "");
        assert_eq!(player.rating, 0);
        assert_eq!(player.birthday, 0);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_absent_player_is_not_found(pool: SqlitePool) -> sqlx::Result<()> {
        insert_carlsen(&pool).await?;

        let result = get_player(&pool, GetPlayerQuery { fide_id: 1 }).await;
        assert!(matches!(result, Err(GetPlayerError::NotFound(1))));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_id_beyond_store_range_is_not_found(pool: SqlitePool) -> sqlx::Result<()> {
        let result = get_player(&pool, GetPlayerQuery { fide_id: u64::MAX }).await;
        assert!(matches!(result, Err(GetPlayerError::NotFound(u64::MAX))));
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_missing_table_is_database_error(pool: SqlitePool) -> sqlx::Result<()> {
        let result = get_player(&pool, GetPlayerQuery { fide_id: 1503014 }).await;
        assert!(matches!(result, Err(GetPlayerError::Database(_))));
        Ok(())
    }

    #[test]
    fn test_narrow_out_of_range_is_default() {
        assert_eq!(narrow::<u8>(Some(300)), 0);
        assert_eq!(narrow::<u8>(Some(40)), 40);
        assert_eq!(narrow::<u16>(None), 0);
    }
}
