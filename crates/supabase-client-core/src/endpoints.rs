//! Per-service endpoint URLs derived from the project URL.

/// Hostname suffixes of the managed platform. URLs on these hosts get the
/// subdomain form of the functions endpoint.
pub const MANAGED_DOMAINS: [&str; 2] = ["supabase.co", "supabase.in"];

/// The five service endpoints, computed once from the project URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    rest: String,
    realtime: String,
    auth: String,
    storage: String,
    functions: String,
}

impl Endpoints {
    /// Derive every service endpoint from `supabase_url`.
    ///
    /// The URL is used verbatim: it is expected to have passed
    /// [`validate`](crate::validate) already.
    pub fn derive(supabase_url: &str) -> Self {
        Self {
            rest: format!("{}/rest/v1", supabase_url),
            realtime: realtime_url(supabase_url),
            auth: format!("{}/auth/v1", supabase_url),
            storage: format!("{}/storage/v1", supabase_url),
            functions: functions_url(supabase_url),
        }
    }

    /// PostgREST endpoint, `{base}/rest/v1`.
    pub fn rest(&self) -> &str {
        &self.rest
    }

    /// Realtime socket endpoint, `{base}/realtime/v1` with `http` swapped for `ws`.
    pub fn realtime(&self) -> &str {
        &self.realtime
    }

    /// GoTrue endpoint, `{base}/auth/v1`.
    pub fn auth(&self) -> &str {
        &self.auth
    }

    /// Storage endpoint, `{base}/storage/v1`.
    pub fn storage(&self) -> &str {
        &self.storage
    }

    /// Edge functions endpoint.
    pub fn functions(&self) -> &str {
        &self.functions
    }
}

/// Every `http` substring becomes `ws`, including ones outside the scheme.
fn realtime_url(supabase_url: &str) -> String {
    format!("{}/realtime/v1", supabase_url).replace("http", "ws")
}

/// `https://<project>.<domain>.<tld>` whose host is on a managed domain becomes
/// `https://<project>.functions.<domain>.<tld>`. Anything else, including
/// managed URLs with an extra subdomain or a dotted path, gets `/functions/v1`.
fn functions_url(supabase_url: &str) -> String {
    let host = reqwest::Url::parse(supabase_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string));
    let is_managed = host.is_some_and(|host| {
        MANAGED_DOMAINS
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
    });

    if is_managed {
        let parts: Vec<&str> = supabase_url.split('.').collect();
        if let [project, domain, tld] = parts.as_slice() {
            return format!("{}.functions.{}.{}", project, domain, tld);
        }
        tracing::debug!(url = supabase_url, "Unrecognized managed URL shape, using /functions/v1");
    }

    format!("{}/functions/v1", supabase_url)
}
