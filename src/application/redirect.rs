use crate::ports::ProcessRequest;

/// Terminal browser hand-off emitted at the end of the payment flow. Either
/// a script redirect back to the shop's order-details page, or the
/// auto-submitting form that posts the customer to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectPage {
    OrderDetails { url: String },
    GatewayPost(ProcessRequest),
}

impl RedirectPage {
    /// Failure path: send the browser to `{store_url}orderdetails/{order_id}`
    pub fn order_details(store_url: &str, order_id: i64) -> Self {
        let mut url = store_url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        RedirectPage::OrderDetails {
            url: format!("{}orderdetails/{}", url, order_id),
        }
    }

    /// Success path: auto-submit the process POST to the gateway
    pub fn gateway_post(request: ProcessRequest) -> Self {
        RedirectPage::GatewayPost(request)
    }

    /// Render the minimal HTML document that performs the navigation. The
    /// response this lands in is terminal; nothing runs after it.
    pub fn into_html(self) -> String {
        match self {
            RedirectPage::OrderDetails { url } => format!(
                "<html><head><script>function GoToUrl(){{window.location = '{}';}} \
                 GoToUrl();</script></head><body></body></html>",
                url
            ),
            RedirectPage::GatewayPost(request) => format!(
                "<html><head></head><body onload=\"document.forms['PayGate'].submit()\">\
                 <form name=\"PayGate\" method=\"POST\" action=\"{}\">\
                 <input type=\"hidden\" name=\"PAY_REQUEST_ID\" value=\"{}\"/>\
                 <input type=\"hidden\" name=\"CHECKSUM\" value=\"{}\"/>\
                 </form></body></html>",
                escape_attr(&request.url),
                escape_attr(&request.pay_request_id),
                escape_attr(&request.checksum),
            ),
        }
    }
}

/// HTML attribute escaping for values echoed by the gateway
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_details_normalizes_trailing_slash_once() {
        let with_slash = RedirectPage::order_details("https://shop.example.com/", 7);
        let without_slash = RedirectPage::order_details("https://shop.example.com", 7);

        let expected = RedirectPage::OrderDetails {
            url: "https://shop.example.com/orderdetails/7".to_string(),
        };
        assert_eq!(with_slash, expected);
        assert_eq!(without_slash, expected);
    }

    #[test]
    fn test_order_details_html_sets_window_location() {
        let html = RedirectPage::order_details("https://shop.example.com", 7).into_html();
        assert!(html.contains("window.location = 'https://shop.example.com/orderdetails/7'"));
        assert!(html.starts_with("<html>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_gateway_post_html_auto_submits_both_fields() {
        let html = RedirectPage::gateway_post(ProcessRequest {
            url: "https://secure.paygate.co.za/payweb3/process.trans".to_string(),
            pay_request_id: "23B785AE".to_string(),
            checksum: "abc123".to_string(),
        })
        .into_html();

        assert!(html.contains("document.forms['PayGate'].submit()"));
        assert!(html.contains("method=\"POST\""));
        assert!(html.contains("action=\"https://secure.paygate.co.za/payweb3/process.trans\""));
        assert!(html.contains("name=\"PAY_REQUEST_ID\" value=\"23B785AE\""));
        assert!(html.contains("name=\"CHECKSUM\" value=\"abc123\""));
    }

    #[test]
    fn test_gateway_post_html_escapes_values() {
        let html = RedirectPage::gateway_post(ProcessRequest {
            url: "https://secure.paygate.co.za/payweb3/process.trans".to_string(),
            pay_request_id: "\"><script>".to_string(),
            checksum: "a&b".to_string(),
        })
        .into_html();

        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(html.contains("value=\"a&amp;b\""));
        assert!(!html.contains("<script>"));
    }
}
