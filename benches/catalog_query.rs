//! 目录查询路径基准测试（图片 URL 解析、分页参数、导入计划）

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rental_catalog::services::{CatalogSettings, ImageResolver, PageRequest, plan_import};
use rental_catalog::storage::backend::escape_like;
use rental_catalog::utils::csv_handler::read_catalog_from;

// ============== ImageResolver 基准测试 ==============

fn bench_image_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver/resolve");

    let relative = ImageResolver::default();
    let absolute = ImageResolver::new("/media/")
        .with_base_url(Some("https://rentals.example.com/".to_string()));

    group.bench_function("uploaded_file_relative", |b| {
        b.iter(|| relative.resolve(black_box(Some("properties/p1.jpg")), None));
    });

    group.bench_function("uploaded_file_absolute", |b| {
        b.iter(|| {
            absolute.resolve(
                black_box(Some("properties/p1.jpg")),
                black_box(Some("https://cdn.example.com/p1.jpg")),
            )
        });
    });

    group.bench_function("external_url", |b| {
        b.iter(|| relative.resolve(None, black_box(Some("https://cdn.example.com/p1.jpg"))));
    });

    group.bench_function("empty", |b| {
        b.iter(|| relative.resolve(black_box(None), black_box(Some(""))));
    });

    group.finish();
}

// ============== 查询参数规范化 ==============

fn bench_page_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("query/page_request");
    let settings = CatalogSettings::default();

    let cases = [
        ("defaults", None, None),
        ("explicit", Some("3"), Some("20")),
        ("clamped", Some("1"), Some("1000")),
        ("garbage", Some("abc"), Some("-5")),
    ];

    for (name, page, page_size) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.iter(|| PageRequest::parse(black_box(page), black_box(page_size), &settings));
        });
    }

    group.bench_function("escape_like", |b| {
        b.iter(|| escape_like(black_box("50%_off \\ villa")));
    });

    group.finish();
}

// ============== 导入计划 ==============

fn catalog_csv(rows: usize) -> String {
    let mut csv = String::from(
        "location_id,location_name,location_city,location_state,location_country,location_zip,location_latitude,location_longitude,location_description,property_id,property_name,property_type,bedrooms,bathrooms,max_guests,price_per_night,property_description,image_ids,image_urls,image_captions\n",
    );
    for i in 0..rows {
        csv.push_str(&format!(
            "LOC{:03},Town {},City {},ST,USA,00000,10.5,-20.25,,PROP{:05},Home {},Villa,3,2.5,6,199.99,,\"IMG{:05}A,\",\"https://img.example.com/{}a.jpg,https://img.example.com/{}b.jpg\",\"Front,Back\"\n",
            i % 50,
            i % 50,
            i % 50,
            i,
            i,
            i,
            i,
            i
        ));
    }
    csv
}

fn bench_plan_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import/plan");

    for size in [100usize, 1000] {
        let rows = read_catalog_from(catalog_csv(size).as_bytes()).expect("valid csv");
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| plan_import(black_box(rows)).expect("valid plan"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_image_resolver,
    bench_page_request,
    bench_plan_import
);
criterion_main!(benches);
