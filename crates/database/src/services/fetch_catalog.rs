use crate::entities::{course, prerequisite};
use log::{debug, info};
use models::{
    course::LogicType,
    raw::{RawCourse, RawEdge},
};
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Order, QueryOrder, sea_query::NullOrdering};

pub struct FetchCatalogService;

impl FetchCatalogService {
    /// Fetches the whole catalog in one shot: every course row and every
    /// prerequisite row, projected into the raw shapes the graph builder
    /// consumes
    ///
    /// Both tables are fetched concurrently. Either query failing fails the
    /// whole load, so the caller never sees a partial snapshot.
    pub async fn fetch_catalog(
        db: &DatabaseConnection,
    ) -> Result<(Vec<RawCourse>, Vec<RawEdge>), DbErr> {
        let (courses, edges) =
            futures::try_join!(Self::fetch_courses(db), Self::fetch_prerequisites(db))?;

        info!(
            "Fetched {} course rows and {} prerequisite rows",
            courses.len(),
            edges.len()
        );

        Ok((courses, edges))
    }

    /// All rows of the `courses` table as [`RawCourse`] projections
    pub async fn fetch_courses(db: &DatabaseConnection) -> Result<Vec<RawCourse>, DbErr> {
        let rows = course::Entity::find()
            .order_by_asc(course::Column::Code)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(Self::project_course).collect())
    }

    /// All rows of the `prerequisites` table as [`RawEdge`] projections,
    /// ascending by `order_index` within each course with nulls last, so
    /// prerequisite display order matches source intent
    pub async fn fetch_prerequisites(db: &DatabaseConnection) -> Result<Vec<RawEdge>, DbErr> {
        let rows = prerequisite::Entity::find()
            .order_by_asc(prerequisite::Column::CourseId)
            .order_by_with_nulls(prerequisite::Column::OrderIndex, Order::Asc, NullOrdering::Last)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(Self::project_edge).collect())
    }

    fn project_course(row: course::Model) -> RawCourse {
        RawCourse {
            id: row.id.to_string(),
            code: row.code,
            title: row.title,
            credits: row.credits.to_f32().unwrap_or(0.0),
            description: row.description.unwrap_or_default(),
            level: row.level,
            department: row.department,
        }
    }

    fn project_edge(row: prerequisite::Model) -> RawEdge {
        let logic_type = row.logic_type.as_deref().and_then(|raw| {
            let parsed: Option<LogicType> = raw.parse().ok();
            if parsed.is_none() {
                debug!("Unrecognized logic_type {raw:?} on prerequisite row {}", row.id);
            }
            parsed
        });

        RawEdge {
            course_id: row.course_id.to_string(),
            prerequisite_id: row.prerequisite_id.to_string(),
            is_corequisite: row.is_corequisite,
            is_exclusion: row.is_exclusion,
            logic_type,
            order_index: row.order_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use sea_orm::prelude::Uuid;

    fn course_row(credits: Decimal) -> course::Model {
        course::Model {
            id: Uuid::nil(),
            code: "COMP 1001".to_string(),
            title: "Introduction".to_string(),
            credits,
            description: None,
            level: 1000,
            department: "COMP".to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_project_course_credits_and_defaults() {
        let raw = FetchCatalogService::project_course(course_row(Decimal::new(5, 1)));

        assert_eq!(raw.credits, 0.5);
        assert_eq!(raw.description, "");
    }

    #[test]
    fn test_project_edge_logic_type() {
        let row = prerequisite::Model {
            id: Uuid::nil(),
            course_id: Uuid::nil(),
            prerequisite_id: Uuid::nil(),
            is_corequisite: false,
            is_exclusion: false,
            logic_type: Some("OR".to_string()),
            order_index: Some(0),
        };

        let raw = FetchCatalogService::project_edge(row.clone());
        assert_eq!(raw.logic_type, Some(LogicType::Or));

        // Unknown stored values degrade to no logic type rather than erroring
        let unknown = prerequisite::Model {
            logic_type: Some("XOR".to_string()),
            ..row
        };
        assert_eq!(FetchCatalogService::project_edge(unknown).logic_type, None);
    }
}
