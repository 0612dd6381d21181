//! Request-shape tests for supabase-client-query through its public API.
//!
//! Requests are rendered with `build()` and inspected without sending.
//! Sending and response parsing are covered by the `supabase-client`
//! crate's tests against a local mock server.

use std::collections::HashMap;

use reqwest::Method;
use serde_json::json;
use supabase_client_query::{
    CountOption, FilterOperator, Filterable, IsValue, Modifiable, OrderDirection,
    PostgrestClient, PostgrestError,
};

fn db() -> PostgrestClient {
    let headers = HashMap::from([("apiKey".to_string(), "anon-key".to_string())]);
    PostgrestClient::with_defaults("http://127.0.0.1:54321/rest/v1", &headers).unwrap()
}

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_string(), v.to_string())
}

mod unit_tests {
    use super::*;

    #[test]
    fn select_chain() {
        let req = db()
            .from("cities")
            .select("name, country_id")
            .gte("population", 1_000_000)
            .not("country_id", FilterOperator::Is, "null")
            .order("population", OrderDirection::Descending)
            .range(0, 9)
            .count(CountOption::Exact)
            .build()
            .unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url, "http://127.0.0.1:54321/rest/v1/cities");
        assert_eq!(
            req.query,
            vec![
                pair("select", "name,country_id"),
                pair("population", "gte.1000000"),
                pair("country_id", "not.is.null"),
                pair("order", "population.desc"),
                pair("limit", "10"),
                pair("offset", "0"),
            ]
        );
        assert_eq!(req.headers.get("Prefer").unwrap(), "count=exact");
    }

    #[test]
    fn update_with_filter() {
        let req = db()
            .from("todos")
            .update(json!({ "done": true }))
            .eq("id", 7)
            .build()
            .unwrap();
        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.query, vec![pair("id", "eq.7")]);
        assert_eq!(req.body, Some(json!({ "done": true })));
        assert_eq!(req.headers.get("Prefer").unwrap(), "return=representation");
    }

    #[test]
    fn delete_with_in_filter() {
        let req = db()
            .from("todos")
            .delete()
            .in_("id", ["a", "b"])
            .build()
            .unwrap();
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.query, vec![pair("id", "in.(a,b)")]);
        assert!(req.body.is_none());
    }

    #[test]
    fn upsert_on_conflict() {
        let req = db()
            .from("profiles")
            .upsert(json!([{ "username": "ada" }]))
            .on_conflict("username")
            .build()
            .unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.query, vec![pair("on_conflict", "username")]);
        assert_eq!(
            req.headers.get("Prefer").unwrap(),
            "resolution=merge-duplicates,return=representation"
        );
    }

    #[test]
    fn head_count_only() {
        let req = db()
            .from("cities")
            .select("*")
            .is("deleted_at", IsValue::Null)
            .count(CountOption::Planned)
            .head()
            .build()
            .unwrap();
        assert_eq!(req.method, Method::HEAD);
        assert_eq!(req.headers.get("Prefer").unwrap(), "count=planned");
    }

    #[test]
    fn head_does_not_change_writes() {
        let req = db().from("cities").delete().head().build().unwrap();
        assert_eq!(req.method, Method::DELETE);
    }

    #[test]
    fn single_row() {
        let req = db()
            .from("users")
            .select("*")
            .ilike("email", "ADA@example.com")
            .single()
            .build()
            .unwrap();
        assert_eq!(
            req.headers.get("Accept").unwrap(),
            "application/vnd.pgrst.object+json"
        );
    }

    #[test]
    fn rpc_args_must_be_object() {
        let err = db().rpc("sum", json!(3)).unwrap_err();
        assert!(matches!(err, PostgrestError::QueryBuilder(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let client = PostgrestClient::with_defaults("http://127.0.0.1:9/rest/v1", &HashMap::new()).unwrap();
        let err = client.from("cities").select("*").execute().await.unwrap_err();
        assert!(matches!(err, PostgrestError::Http(_)));
    }
}
