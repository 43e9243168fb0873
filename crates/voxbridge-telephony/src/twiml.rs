use quick_xml::escape::escape;

/// Renders TwiML that connects the call's media stream to `url`.
///
/// The URL is placed in an XML attribute, so markup characters are escaped.
pub fn stream_twiml(url: &str) -> String {
    format!(
        r#"<Response><Connect><Stream url="{}"/></Connect></Response>"#,
        escape(url)
    )
}
