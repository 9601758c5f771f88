//! Integration tests for POST /api/score

mod common;

use axum::http::StatusCode;
use colorgorical::models::{AppConfig, Weights};
use colorgorical_scores::{ciede2000, Lab};
use common::fixtures::palettes;
use common::{assert_close, assert_json_error, assert_ok, assert_status, TestApp};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn score_body(palette: &str) -> String {
    format!(r#"{{"palette": {palette}}}"#)
}

#[tokio::test]
async fn test_score_triad_pairs_and_minima() {
    let app = TestApp::new();
    let response = app.post_json("/api/score", &score_body(palettes::TRIAD)).await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["name"], "???");
    assert!(json["uniq_id"].as_str().unwrap().parse::<i64>().is_ok());

    let pairs = json["pairs"].as_array().unwrap();
    let indexes: Vec<Value> = pairs.iter().map(|p| p["pair"].clone()).collect();
    assert_eq!(
        indexes,
        vec![
            serde_json::json!([0, 1]),
            serde_json::json!([0, 2]),
            serde_json::json!([1, 2])
        ]
    );

    // lightness bands 1, 2 and 3 of the synthetic tables
    let nd_01 = 0.5f64.sqrt();
    let nd_02 = (1.0 - (30f64.sqrt() + 10f64.sqrt()) / 160f64.sqrt()).sqrt();
    assert_close(pairs[0]["nd"].as_f64().unwrap(), nd_01, 1e-12);
    assert_close(pairs[1]["nd"].as_f64().unwrap(), nd_02, 1e-12);
    assert_close(pairs[0]["nu1"].as_f64().unwrap(), 2.0 / 4.5, 1e-12);
    assert_close(pairs[0]["nu2"].as_f64().unwrap(), 4.0 / 4.5, 1e-12);

    let de_01 = ciede2000(Lab::new(30.0, 40.0, -20.0), Lab::new(55.0, -30.0, 45.0));
    assert_close(pairs[0]["de"].as_f64().unwrap(), de_01, 1e-9);

    // default weights: 1, 1, 0, 1
    let min = &json["min_scores"];
    assert_close(min["nd"].as_f64().unwrap(), nd_02, 1e-12);
    assert_eq!(min["nu"].as_f64(), Some(0.0));
    let min_de = pairs
        .iter()
        .map(|p| p["de"].as_f64().unwrap())
        .fold(f64::INFINITY, f64::min);
    assert_close(min["de"].as_f64().unwrap(), min_de, 1e-12);
    assert!(json["normalized"]["distance"].is_number());
}

#[tokio::test]
async fn test_score_matrices_are_lower_triangular() {
    let app = TestApp::new();
    let json: Value = app
        .post_json("/api/score", &score_body(palettes::TRIAD))
        .await
        .json();

    let pairs = json["pairs"].as_array().unwrap();
    for (name, key) in [("de_matrix", "de"), ("nd_matrix", "nd"), ("pp_matrix", "pp")] {
        let matrix = json[name].as_array().unwrap();
        assert_eq!(matrix.len(), 3);
        for pair in pairs {
            let (i, j) = (
                pair["pair"][0].as_u64().unwrap() as usize,
                pair["pair"][1].as_u64().unwrap() as usize,
            );
            assert_eq!(matrix[j][i], pair[key], "{name}[{j}][{i}]");
            assert!(matrix[i][j].is_null(), "{name}[{i}][{j}]");
        }
        for k in 0..3 {
            assert!(matrix[k][k].is_null());
        }
    }
}

#[tokio::test]
async fn test_score_reports_per_color_values() {
    let app = TestApp::new();
    let json: Value = app
        .post_json("/api/score", &score_body(palettes::TRIAD))
        .await
        .json();

    let colors = json["colors"].as_array().unwrap();
    assert_eq!(colors.len(), 3);
    assert_eq!(colors[2]["lab"], serde_json::json!([80.0, 10.0, 60.0]));
    // hue ~80°, L > 75
    assert_eq!(colors[2]["penalty"].as_f64(), Some(0.85));
    assert_eq!(colors[0]["penalty"].as_f64(), Some(1.0));
    assert_close(colors[1]["name_uniqueness"].as_f64().unwrap(), 4.0 / 4.5, 1e-12);
    assert!(colors[0]["hex"].as_str().unwrap().starts_with('#'));
}

#[tokio::test]
async fn test_score_accepts_srgb_and_name() {
    let app = TestApp::new();
    let body = format!(r#"{{"palette": {}, "name": "set1"}}"#, palettes::SRGB);
    let response = app.post_json("/api/score", &body).await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["name"], "set1");
    assert_eq!(json["colors"][0]["input"], "#e41a1c");
    for color in json["colors"].as_array().unwrap() {
        for v in color["lab"].as_array().unwrap() {
            assert_eq!(v.as_f64().unwrap() % 5.0, 0.0, "not snapped: {color}");
        }
    }
    assert_eq!(json["pairs"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_score_request_weights_override_config() {
    let app = TestApp::new();
    let body = format!(
        r#"{{"palette": {}, "weights": {{"ciede2000": 0.5, "name_uniqueness": 1.0}}}}"#,
        palettes::TRIAD
    );
    let weighted: Value = app.post_json("/api/score", &body).await.json();
    let plain: Value = app
        .post_json("/api/score", &score_body(palettes::TRIAD))
        .await
        .json();

    let de = plain["min_scores"]["de"].as_f64().unwrap();
    assert_close(weighted["min_scores"]["de"].as_f64().unwrap(), de * 0.5, 1e-12);
    // band 3 has the least spread of names
    let nu_3 = (0.75 * (4.0f64 / 3.0).log2() + 0.25 * 2.0) / 4.5;
    assert_close(weighted["min_scores"]["nu"].as_f64().unwrap(), nu_3, 1e-12);
}

#[tokio::test]
async fn test_score_uses_configured_weights() {
    let config = AppConfig {
        weights: Weights {
            pair_preference: 0.0,
            ..Weights::default()
        },
        ..AppConfig::default()
    };
    let app = TestApp::with_config(config);
    let json: Value = app
        .post_json("/api/score", &score_body(palettes::TRIAD))
        .await
        .json();
    assert_eq!(json["min_scores"]["pp"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_score_partial_request_weights_keep_configured_ones() {
    let config = AppConfig {
        weights: Weights {
            name_uniqueness: 0.5,
            ..Weights::default()
        },
        ..AppConfig::default()
    };
    let app = TestApp::with_config(config);
    let body = format!(
        r#"{{"palette": {}, "weights": {{"ciede2000": 0.5}}}}"#,
        palettes::TRIAD
    );
    let weighted: Value = app.post_json("/api/score", &body).await.json();
    let plain: Value = TestApp::new()
        .post_json("/api/score", &score_body(palettes::TRIAD))
        .await
        .json();

    let de = plain["min_scores"]["de"].as_f64().unwrap();
    assert_close(weighted["min_scores"]["de"].as_f64().unwrap(), de * 0.5, 1e-12);
    // name_uniqueness comes from the config, not the default of 0
    let nu_3 = (0.75 * (4.0f64 / 3.0).log2() + 0.25 * 2.0) / 4.5;
    assert_close(weighted["min_scores"]["nu"].as_f64().unwrap(), 0.5 * nu_3, 1e-12);
    assert_eq!(weighted["min_scores"]["pp"], plain["min_scores"]["pp"]);
}

#[tokio::test]
async fn test_score_single_color_has_no_pairs() {
    let app = TestApp::new();
    let response = app.post_json("/api/score", &score_body("[[50, 10, 10]]")).await;
    assert_ok(&response);

    let json: Value = response.json();
    assert!(json["pairs"].as_array().unwrap().is_empty());
    assert_eq!(json["min_scores"], serde_json::json!({"de": 0.0, "nd": 0.0, "pp": 0.0, "nu": 0.0}));
    assert!(json["normalized"].is_null());
    assert_eq!(json["de_matrix"], serde_json::json!([[null]]));
    assert_eq!(json["colors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_score_rejects_out_of_range_color() {
    let app = TestApp::new();
    let response = app
        .post_json("/api/score", &score_body("[[50, 0, 0], [50, 0, -140]]"))
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_error(&response, 400);

    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("color 1"));
}

#[tokio::test]
async fn test_score_rejects_bad_srgb() {
    let app = TestApp::new();
    let response = app
        .post_json("/api/score", &score_body(r##"["#e41a1c", "#zz0000"]"##))
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_error(&response, 400);
}

#[tokio::test]
async fn test_score_rejects_weight_out_of_range() {
    let app = TestApp::new();
    let body = format!(
        r#"{{"palette": {}, "weights": {{"pair_preference": 2.0}}}}"#,
        palettes::TRIAD
    );
    let response = app.post_json("/api/score", &body).await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("pair_preference"));
}

#[tokio::test]
async fn test_score_unobserved_name_is_a_server_error() {
    let app = TestApp::new();
    // L = 100 maps to a named color without observations
    let response = app
        .post_json("/api/score", &score_body("[[50, 0, 0], [100, 0, 0]]"))
        .await;
    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_json_error(&response, 500);

    let json: Value = response.json();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("no term observations"));
}
