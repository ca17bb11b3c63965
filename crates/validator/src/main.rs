//! Structural validation of the stored catalog.
//!
//! Fetches every course and prerequisite row, builds the course graph, and
//! reports what the build kept and dropped. A dependency cycle is a hard
//! failure: the graph is malformed and the explorer must not serve it.

use database::{db::create_connection, services::fetch_catalog::FetchCatalogService};
use engine::{Catalog, query::has_cycle};
use log::{error, info, warn};
use models::course::YearBand;
use std::collections::BTreeMap;

#[tokio::main]
async fn main() {
    env_logger::init();

    let db = create_connection()
        .await
        .expect("Failed to connect to the database");

    let (raw_courses, raw_edges) = FetchCatalogService::fetch_catalog(&db)
        .await
        .expect("Failed to fetch catalog rows");
    let raw_course_count = raw_courses.len();
    let raw_edge_count = raw_edges.len();

    let catalog = Catalog::from_rows(raw_courses, raw_edges);

    let kept_edges: usize = catalog
        .courses()
        .iter()
        .map(|course| course.prerequisites.len())
        .sum();

    info!(
        "Built graph: {} of {} courses retained, {} of {} edges attached",
        catalog.len(),
        raw_course_count,
        kept_edges,
        raw_edge_count
    );

    let dropped_edges = raw_edge_count - kept_edges;
    if dropped_edges > 0 {
        warn!("Dropped {dropped_edges} edges referencing filtered or unknown courses");
    }

    let mut per_band: BTreeMap<YearBand, usize> = BTreeMap::new();
    for course in catalog.courses() {
        *per_band.entry(course.year_band()).or_default() += 1;
    }
    for (band, count) in &per_band {
        info!("{band}: {count} courses");
    }

    if has_cycle(catalog.courses()) {
        error!("Dependency cycle detected in the non-exclusion prerequisite graph");
        std::process::exit(1);
    }

    info!("Catalog is structurally valid");
}
