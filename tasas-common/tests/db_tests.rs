//! Database initialization and query tests

use tasas_common::db::{
    count_fees, count_universities, fees_for_university, find_by_short_code, init_database,
    insert_fee, insert_university, latest_fees_for_year, list_universities, update_university,
    yearly_averages, FeeDraft, NewUniversity,
};
use tasas_common::{DegreeLevel, FeeType, UniversityCategory};
use tempfile::TempDir;

fn new_university(code: &str, province: &str, category: UniversityCategory) -> NewUniversity {
    NewUniversity {
        short_code: code.to_string(),
        name: format!("Universidad {}", code.to_uppercase()),
        category,
        center: None,
        campus: None,
        province: province.to_string(),
        url: None,
        logo: None,
    }
}

fn fee(year: i32, tiers: [f64; 4]) -> FeeDraft {
    FeeDraft {
        academic_year: year,
        fee_type: FeeType::PricePerCredit,
        degree_level: DegreeLevel::Undergraduate,
        tiers,
        source_url: None,
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("tasas.db");

    let pool = init_database(&db_path).await.expect("init should succeed");
    assert!(db_path.exists(), "Database file was not created");

    let version: i64 = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(version, tasas_common::db::SCHEMA_VERSION);
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("tasas.db");

    let pool = init_database(&db_path).await.unwrap();
    insert_university(&pool, &new_university("uam", "Madrid", UniversityCategory::Public))
        .await
        .unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.expect("reopen should succeed");
    assert_eq!(count_universities(&pool, None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_insert_find_update_university() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("tasas.db")).await.unwrap();

    assert!(find_by_short_code(&pool, "uam").await.unwrap().is_none());

    let mut uni = new_university("uam", "Madrid", UniversityCategory::Public);
    uni.logo = Some("logos/uni_uam.jpg".to_string());
    let created = insert_university(&pool, &uni).await.unwrap();
    assert_eq!(created.short_code, "uam");
    assert_eq!(created.category, UniversityCategory::Public);

    let found = find_by_short_code(&pool, "uam").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);

    // Update without a logo keeps the stored one
    let mut changed = new_university("uam", "Madrid", UniversityCategory::Private);
    changed.name = "UAM".to_string();
    let updated = update_university(&pool, created.id, &changed).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "UAM");
    assert_eq!(updated.category, UniversityCategory::Private);
    assert_eq!(updated.logo.as_deref(), Some("logos/uni_uam.jpg"));
}

#[tokio::test]
async fn test_short_code_is_unique() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("tasas.db")).await.unwrap();

    let uni = new_university("uam", "Madrid", UniversityCategory::Public);
    insert_university(&pool, &uni).await.unwrap();
    assert!(insert_university(&pool, &uni).await.is_err());
}

#[tokio::test]
async fn test_list_by_province() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("tasas.db")).await.unwrap();

    for (code, province) in [("ucm", "Madrid"), ("ub", "Barcelona"), ("uam", "Madrid")] {
        insert_university(&pool, &new_university(code, province, UniversityCategory::Public))
            .await
            .unwrap();
    }

    assert_eq!(count_universities(&pool, Some("Madrid")).await.unwrap(), 2);
    let madrid = list_universities(&pool, Some("Madrid"), 50, 0).await.unwrap();
    let codes: Vec<_> = madrid.iter().map(|u| u.short_code.as_str()).collect();
    assert_eq!(codes, vec!["uam", "ucm"]);

    let page = list_universities(&pool, None, 2, 2).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].short_code, "ucm");
}

#[tokio::test]
async fn test_fees_are_appended_not_replaced() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("tasas.db")).await.unwrap();
    let uni = insert_university(&pool, &new_university("uam", "Madrid", UniversityCategory::Public))
        .await
        .unwrap();

    insert_fee(&pool, uni.id, &fee(2016, [18.456, 37.0, 80.0, 111.0])).await.unwrap();
    insert_fee(&pool, uni.id, &fee(2015, [17.0, 35.0, 76.0, 105.0])).await.unwrap();
    insert_fee(&pool, uni.id, &fee(2016, [18.456, 37.0, 80.0, 111.0])).await.unwrap();

    assert_eq!(count_fees(&pool).await.unwrap(), 3);

    let fees = fees_for_university(&pool, uni.id).await.unwrap();
    let years: Vec<_> = fees.iter().map(|f| f.academic_year).collect();
    assert_eq!(years, vec![2015, 2016, 2016]);
    assert_eq!(fees[1].tiers[0], 18.46);
    assert_eq!(fees[1].fee_type, FeeType::PricePerCredit);
    assert_eq!(fees[1].degree_level, DegreeLevel::Undergraduate);
}

#[tokio::test]
async fn test_yearly_averages() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("tasas.db")).await.unwrap();
    let public = insert_university(&pool, &new_university("uam", "Madrid", UniversityCategory::Public))
        .await
        .unwrap();
    let private = insert_university(&pool, &new_university("ueuropea", "Madrid", UniversityCategory::Private))
        .await
        .unwrap();

    insert_fee(&pool, public.id, &fee(2016, [20.0, 40.0, 80.0, 100.0])).await.unwrap();
    insert_fee(&pool, private.id, &fee(2016, [100.0, 100.0, 100.0, 100.0])).await.unwrap();
    insert_fee(&pool, public.id, &fee(2017, [22.0, 44.0, 88.0, 110.0])).await.unwrap();

    let all = yearly_averages(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].academic_year, 2016);
    assert_eq!(all[0].universities, 2);
    assert_eq!(all[0].tiers, [60.0, 70.0, 90.0, 100.0]);

    let public_only = yearly_averages(&pool, Some(UniversityCategory::Public)).await.unwrap();
    assert_eq!(public_only[0].tiers, [20.0, 40.0, 80.0, 100.0]);
    assert_eq!(public_only[1].academic_year, 2017);
}

#[tokio::test]
async fn test_database_path_with_url_characters() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fees?v=1#draft").join("tasas#1.db");

    let pool = init_database(&db_path).await.expect("init should succeed");
    insert_university(&pool, &new_university("uam", "Madrid", UniversityCategory::Public))
        .await
        .unwrap();
    pool.close().await;

    assert!(db_path.is_file(), "Database should be created at the literal path");
    let pool = init_database(&db_path).await.unwrap();
    assert_eq!(count_universities(&pool, None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_latest_fees_for_year() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("tasas.db")).await.unwrap();

    let uam = insert_university(&pool, &new_university("uam", "Madrid", UniversityCategory::Public))
        .await
        .unwrap();
    let ub = insert_university(&pool, &new_university("ub", "Barcelona", UniversityCategory::Private))
        .await
        .unwrap();

    insert_fee(&pool, uam.id, &fee(2016, [20.0, 40.0, 80.0, 100.0])).await.unwrap();
    insert_fee(&pool, uam.id, &fee(2016, [21.0, 41.0, 81.0, 101.0])).await.unwrap();
    insert_fee(&pool, uam.id, &fee(2015, [19.0, 38.0, 76.0, 95.0])).await.unwrap();
    insert_fee(&pool, ub.id, &fee(2015, [100.0, 100.0, 100.0, 100.0])).await.unwrap();

    let current = latest_fees_for_year(&pool, 2016).await.unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[&uam.id].tiers[0], 21.0);
    assert!(!current.contains_key(&ub.id));

    assert!(latest_fees_for_year(&pool, 2030).await.unwrap().is_empty());
}
