//! SOAP 1.2 envelope building and parsing
//!
//! Outgoing envelopes carry WS-Addressing `Action`/`To` headers the way the data and
//! streaming services expect them. Incoming envelopes are flattened into a list of
//! element paths (local names only) so that callers can look values up without
//! caring about namespace prefixes.

use crate::error::ApiError;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

pub const SOAP_ENV_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
pub const ADDRESSING_NS: &str = "http://www.w3.org/2005/08/addressing";
pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Outgoing SOAP envelope
#[derive(Debug, Clone)]
pub struct Envelope {
    action: String,
    to: String,
    headers: Vec<String>,
    body: String,
}

impl Envelope {
    pub fn new(action: &str, to: &str) -> Self {
        Self {
            action: action.to_string(),
            to: to.to_string(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a raw XML header block. The caller is responsible for escaping.
    pub fn with_header(mut self, header_xml: String) -> Self {
        self.headers.push(header_xml);
        self
    }

    pub fn with_body(mut self, body_xml: String) -> Self {
        self.body = body_xml;
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// `Content-Type` value for SOAP 1.2, which carries the action as a parameter
    pub fn content_type(&self) -> String {
        format!("{}; action=\"{}\"", SOAP_CONTENT_TYPE, self.action)
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.body.len());
        xml.push_str(&format!(
            r#"<s:Envelope xmlns:s="{}" xmlns:a="{}">"#,
            SOAP_ENV_NS, ADDRESSING_NS
        ));
        xml.push_str("<s:Header>");
        xml.push_str(&format!(
            r#"<a:Action s:mustUnderstand="1">{}</a:Action>"#,
            escape(self.action.as_str())
        ));
        xml.push_str(&format!(
            r#"<a:To s:mustUnderstand="1">{}</a:To>"#,
            escape(self.to.as_str())
        ));
        for header in &self.headers {
            xml.push_str(header);
        }
        xml.push_str("</s:Header>");
        xml.push_str("<s:Body>");
        xml.push_str(&self.body);
        xml.push_str("</s:Body>");
        xml.push_str("</s:Envelope>");
        xml
    }
}

/// Write `<name>value</name>` with the value escaped
pub fn text_element(name: &str, value: &str) -> String {
    format!("<{name}>{}</{name}>", escape(value))
}

#[derive(Debug, Clone, PartialEq)]
struct XmlElement {
    path: Vec<String>,
    text: String,
}

/// SOAP fault details extracted from a response body
#[derive(Debug, Clone, PartialEq)]
pub struct SoapFault {
    pub code: String,
    pub reason: String,
}

/// Parsed incoming SOAP message
#[derive(Debug, Clone, Default)]
pub struct SoapMessage {
    elements: Vec<XmlElement>,
}

impl SoapMessage {
    pub fn parse(xml: &str, endpoint: &str) -> Result<Self, ApiError> {
        let malformed = |message: String| ApiError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message,
        };

        // Text is kept verbatim so inline report content survives untouched
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<(String, String)> = Vec::new();
        let mut elements = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    stack.push((name, String::new()));
                }
                Ok(Event::Empty(empty)) => {
                    let name = String::from_utf8_lossy(empty.local_name().as_ref()).into_owned();
                    let mut path: Vec<String> = stack.iter().map(|(n, _)| n.clone()).collect();
                    path.push(name);
                    elements.push(XmlElement {
                        path,
                        text: String::new(),
                    });
                }
                Ok(Event::Text(text)) => {
                    let value = text
                        .unescape()
                        .map_err(|e| malformed(format!("invalid text content: {}", e)))?;
                    if let Some((_, buffer)) = stack.last_mut() {
                        buffer.push_str(&value);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some((_, buffer)) = stack.last_mut() {
                        buffer.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Ok(Event::End(_)) => {
                    let path: Vec<String> = stack.iter().map(|(n, _)| n.clone()).collect();
                    let Some((_, text)) = stack.pop() else {
                        return Err(malformed("unbalanced closing tag".to_string()));
                    };
                    elements.push(XmlElement { path, text });
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(malformed(format!(
                        "XML error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
            }
        }

        if !stack.is_empty() {
            return Err(malformed("document ended inside an element".to_string()));
        }
        if !elements
            .iter()
            .any(|e| e.path.len() == 1 && e.path[0] == "Envelope")
        {
            return Err(malformed("missing SOAP Envelope".to_string()));
        }

        Ok(Self { elements })
    }

    /// First element named `name` whose ancestors include `scope`
    pub fn find(&self, scope: &str, name: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| {
                e.path.last().is_some_and(|last| last == name)
                    && e.path[..e.path.len() - 1].iter().any(|p| p == scope)
            })
            .map(|e| e.text.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.find("Header", name)
    }

    pub fn body(&self, name: &str) -> Option<&str> {
        self.find("Body", name)
    }

    pub fn has_body_element(&self, name: &str) -> bool {
        self.body(name).is_some()
    }

    pub fn fault(&self) -> Option<SoapFault> {
        if !self.has_body_element("Fault") {
            return None;
        }
        // SOAP 1.2 nests the code as Code/Value and the reason as Reason/Text
        let code = self.find("Code", "Value").unwrap_or_default().to_string();
        let reason = self
            .find("Reason", "Text")
            .or_else(|| self.find("Fault", "faultstring"))
            .unwrap_or("unspecified fault")
            .to_string();
        Some(SoapFault { code, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_contains_addressing_headers() {
        let xml = Envelope::new("urn:test/Op", "http://example.test/svc")
            .with_body("<Op/>".to_string())
            .to_xml();

        assert!(xml.starts_with("<s:Envelope"));
        assert!(xml.contains(r#"<a:Action s:mustUnderstand="1">urn:test/Op</a:Action>"#));
        assert!(xml.contains(r#"<a:To s:mustUnderstand="1">http://example.test/svc</a:To>"#));
        assert!(xml.contains("<s:Body><Op/></s:Body>"));
    }

    #[test]
    fn test_content_type_carries_action() {
        let envelope = Envelope::new("urn:test/Op", "http://example.test/svc");
        assert_eq!(
            envelope.content_type(),
            "application/soap+xml; charset=utf-8; action=\"urn:test/Op\""
        );
    }

    #[test]
    fn test_text_element_escapes_value() {
        assert_eq!(
            text_element("Password", "a<b&c"),
            "<Password>a&lt;b&amp;c</Password>"
        );
    }

    #[test]
    fn test_parse_finds_values_regardless_of_prefix() {
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope">
            <s:Header><h:Status xmlns:h="urn:x">Success</h:Status></s:Header>
            <s:Body><Result xmlns="urn:y"><Token>abc &amp; def</Token><Empty/></Result></s:Body>
        </s:Envelope>"#;

        let message = SoapMessage::parse(xml, "test").unwrap();
        assert_eq!(message.header("Status"), Some("Success"));
        assert_eq!(message.body("Token"), Some("abc & def"));
        assert_eq!(message.find("Result", "Empty"), Some(""));
        assert!(message.body("Status").is_none());
        assert!(message.fault().is_none());
    }

    #[test]
    fn test_parse_fault() {
        let xml = r#"<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope"><s:Body>
            <s:Fault><s:Code><s:Value>s:Receiver</s:Value></s:Code>
            <s:Reason><s:Text xml:lang="en-US">Invalid report path</s:Text></s:Reason></s:Fault>
        </s:Body></s:Envelope>"#;

        let fault = SoapMessage::parse(xml, "test").unwrap().fault().unwrap();
        assert_eq!(fault.code, "s:Receiver");
        assert_eq!(fault.reason, "Invalid report path");
    }

    #[test]
    fn test_parse_rejects_non_envelope() {
        let result = SoapMessage::parse("<html><body>oops</body></html>", "LogOn");
        assert!(matches!(
            result,
            Err(ApiError::MalformedResponse { ref endpoint, .. }) if endpoint == "LogOn"
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_document() {
        let result = SoapMessage::parse("<s:Envelope><s:Body>", "LogOn");
        assert!(result.is_err());
    }
}
