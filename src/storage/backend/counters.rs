//! 广告计数落盘
//!
//! 每种计数一条 `UPDATE ... SET col = CASE id WHEN .. THEN col + n .. END`，
//! 曝光与点击在同一事务内提交，失败时整体回滚，由上层回填缓冲区。

use async_trait::async_trait;
use sea_orm::sea_query::{CaseStatement, Expr, Query, UpdateStatement};
use sea_orm::{ConnectionTrait, ExprTrait, TransactionTrait};
use tracing::debug;

use super::SeaOrmStorage;
use super::retry;
use crate::ads::{AdCounter, CounterKind, CounterSink};

use migration::entities::ad;

fn increment_statement(column: ad::Column, increments: &[(i32, u64)]) -> Option<UpdateStatement> {
    if increments.is_empty() {
        return None;
    }

    let mut case_stmt = CaseStatement::new();
    let mut ids: Vec<i32> = Vec::with_capacity(increments.len());
    for (ad_id, count) in increments {
        case_stmt = case_stmt.case(
            Expr::col(ad::Column::Id).eq(Expr::val(*ad_id)),
            Expr::col(column).add(Expr::val(*count as i64)),
        );
        ids.push(*ad_id);
    }
    // 不匹配的保持原值
    case_stmt = case_stmt.finally(Expr::col(column));

    Some(
        Query::update()
            .table(ad::Entity)
            .value(column, case_stmt)
            .and_where(Expr::col(ad::Column::Id).is_in(ids))
            .to_owned(),
    )
}

fn split_by_kind(updates: &[(AdCounter, u64)]) -> (Vec<(i32, u64)>, Vec<(i32, u64)>) {
    let mut views = Vec::new();
    let mut clicks = Vec::new();
    for (counter, count) in updates {
        match counter.kind {
            CounterKind::View => views.push((counter.ad_id, *count)),
            CounterKind::Click => clicks.push((counter.ad_id, *count)),
        }
    }
    (views, clicks)
}

#[async_trait]
impl CounterSink for SeaOrmStorage {
    async fn flush_counters(&self, updates: Vec<(AdCounter, u64)>) -> anyhow::Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let (views, clicks) = split_by_kind(&updates);
        let statements: Vec<UpdateStatement> = [
            increment_statement(ad::Column::ViewCount, &views),
            increment_statement(ad::Column::ClickCount, &clicks),
        ]
        .into_iter()
        .flatten()
        .collect();

        let db = &self.db;
        let statements_ref = &statements;
        retry::with_retry("flush_counters", self.retry_config, || async move {
            let txn = db.begin().await?;
            for stmt in statements_ref {
                txn.execute(stmt).await?;
            }
            txn.commit().await
        })
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to batch update ad counters (still failed after retries): {}",
                e
            )
        })?;

        debug!(
            "Ad counters flushed to {} database ({} views, {} clicks)",
            self.backend_name.to_uppercase(),
            views.len(),
            clicks.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbBackend;

    #[test]
    fn test_split_by_kind() {
        let updates = vec![
            (AdCounter::view(1), 3),
            (AdCounter::click(1), 1),
            (AdCounter::view(2), 5),
        ];
        let (views, clicks) = split_by_kind(&updates);
        assert_eq!(views, vec![(1, 3), (2, 5)]);
        assert_eq!(clicks, vec![(1, 1)]);
    }

    #[test]
    fn test_increment_statement_shape() {
        assert!(increment_statement(ad::Column::ViewCount, &[]).is_none());

        let stmt = increment_statement(ad::Column::ClickCount, &[(4, 2), (9, 1)]).unwrap();
        let sql = DbBackend::Sqlite.build(&stmt).to_string();
        assert!(sql.starts_with(r#"UPDATE "ads" SET "click_count" ="#), "{}", sql);
        assert!(sql.contains("CASE"), "{}", sql);
        assert!(sql.contains(r#""id" IN (4, 9)"#), "{}", sql);
    }
}
