use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use super::IspLookup;
use crate::error::{Error, Result};
use crate::record::IspDetails;

/// Public ipinfo.io endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ipinfo.io";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`IpInfoClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpInfoConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Honour `HTTP(S)_PROXY` and friends from the environment.
    pub system_proxy: bool,
}

impl Default for IpInfoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            system_proxy: true,
        }
    }
}

/// Blocking client for the ipinfo.io `/<ip>/json` endpoint.
#[derive(Clone, Debug)]
pub struct IpInfoClient {
    client: Client,
    base_url: String,
}

impl IpInfoClient {
    pub fn new(config: IpInfoConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ipreport/", env!("CARGO_PKG_VERSION")));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, address: &str) -> String {
        format!("{}/{}/json", self.base_url, address)
    }

    /// Query the service, surfacing every failure as an [`Error`].
    pub fn fetch(&self, address: &str, token: Option<&str>) -> Result<IspDetails> {
        let mut request = self.client.get(self.url(address)).header(ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                address: address.to_string(),
                status,
            });
        }
        Ok(response.json::<IspDetails>()?)
    }
}

impl IspLookup for IpInfoClient {
    fn lookup(&mut self, address: &str, token: Option<&str>) -> IspDetails {
        match self.fetch(address, token) {
            Ok(details) => details,
            Err(err) => {
                warn!("ISP lookup for {} failed: {}", address, err);
                debug!("ISP lookup error detail: {:?}", err);
                IspDetails::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response and hand back the request line.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
            request_line
        });
        (base_url, handle)
    }

    fn client(base_url: String) -> IpInfoClient {
        IpInfoClient::new(IpInfoConfig {
            base_url,
            timeout: Duration::from_secs(5),
            system_proxy: false,
        })
        .unwrap()
    }

    #[test]
    fn decodes_fields_and_sends_token() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"ip":"8.8.8.8","hostname":"dns.google","city":"Mountain View","region":"California","country":"US","org":"AS15169 Google LLC"}"#,
        );
        let details = client(base_url).lookup("8.8.8.8", Some("secret"));
        let request_line = server.join().unwrap();

        assert!(request_line.starts_with("GET /8.8.8.8/json?token=secret "));
        assert_eq!(details.city.as_deref(), Some("Mountain View"));
        assert_eq!(details.region.as_deref(), Some("California"));
        assert_eq!(details.country.as_deref(), Some("US"));
        assert_eq!(details.isp.as_deref(), Some("AS15169 Google LLC"));
    }

    #[test]
    fn unauthenticated_query_has_no_token() {
        let (base_url, server) = serve_once("200 OK", r#"{"ip":"1.1.1.1","country":"AU"}"#);
        let details = client(base_url).lookup("1.1.1.1", None);
        let request_line = server.join().unwrap();

        assert!(request_line.starts_with("GET /1.1.1.1/json "));
        assert_eq!(details.country.as_deref(), Some("AU"));
        assert_eq!(details.city, None);
    }

    #[test]
    fn error_status_degrades_to_empty() {
        let (base_url, server) = serve_once(
            "404 Not Found",
            r#"{"status":404,"error":{"title":"Wrong ip","message":"Please provide a valid IP address"}}"#,
        );
        let details = client(base_url).lookup("999.1.1.1", None);
        server.join().unwrap();
        assert_eq!(details, IspDetails::default());
    }

    #[test]
    fn fetch_reports_status() {
        let (base_url, server) = serve_once("429 Too Many Requests", "{}");
        let err = client(base_url).fetch("8.8.4.4", None).unwrap_err();
        server.join().unwrap();
        assert_eq!(err.to_string(), "ISP lookup for 8.8.4.4 returned HTTP 429 Too Many Requests");
    }

    #[test]
    fn unreachable_service_degrades_to_empty() {
        // Bind then drop to get a port nobody is listening on
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let mut lookup = client(format!("http://127.0.0.1:{}", port));
        assert_eq!(lookup.lookup("8.8.8.8", None), IspDetails::default());
    }

    #[test]
    fn trailing_slash_in_base_url() {
        let lookup = client("http://example.invalid/".to_string());
        assert_eq!(lookup.url("8.8.8.8"), "http://example.invalid/8.8.8.8/json");
    }
}
