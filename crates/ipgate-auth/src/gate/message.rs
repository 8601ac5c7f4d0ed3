//! Operator-facing messages: the denial template and the lockout warning.

use std::net::IpAddr;

use ipgate_core::types::GateSettings;

use crate::allowlist::is_ip_permitted;

/// Placeholder replaced with the stored allow-list text.
pub const VALID_IPS_PLACEHOLDER: &str = "[[valid_ips]]";
/// Placeholder replaced with the observed source address.
pub const YOUR_IP_PLACEHOLDER: &str = "[[your_ip]]";

/// Placeholder tokens accepted by the error template.
pub fn placeholders() -> [&'static str; 2] {
    [VALID_IPS_PLACEHOLDER, YOUR_IP_PLACEHOLDER]
}

/// Substitute placeholders in `template`.
///
/// Replacement is a single left-to-right pass, so substituted values are
/// never re-scanned. Unknown `[[...]]` tokens are left as they are.
pub fn render_template(template: &str, valid_ips: &str, your_ip: &str) -> String {
    let mut out = String::with_capacity(template.len() + valid_ips.len() + your_ip.len());
    let mut rest = template;

    while let Some(pos) = rest.find("[[") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix(VALID_IPS_PLACEHOLDER) {
            out.push_str(valid_ips);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(YOUR_IP_PLACEHOLDER) {
            out.push_str(your_ip);
            rest = after;
        } else {
            out.push_str("[[");
            rest = &tail[2..];
        }
    }
    out.push_str(rest);
    out
}

/// The message shown to a caller rejected before login.
///
/// Falls back to `default_text` when the operator template is blank.
pub fn denial_message(settings: &GateSettings, default_text: &str, address: IpAddr) -> String {
    let template = if settings.error_text.trim().is_empty() {
        default_text
    } else {
        settings.error_text.as_str()
    };
    render_template(template, &settings.valid_ips, &address.to_string())
}

/// Warning for an operator whose own address is outside the allow-list.
///
/// Such an operator can reap sessions but will not be able to log back in.
pub fn lockout_warning(settings: &GateSettings, address: IpAddr) -> Option<String> {
    (!is_ip_permitted(&settings.valid_ips, address)).then(|| {
        format!(
            "Your IP {address} is not in the valid IPs list. \
             You will not be able to log in once you are logged out."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(valid_ips: &str, error_text: &str) -> GateSettings {
        GateSettings {
            valid_ips: valid_ips.into(),
            check_before_login: true,
            error_text: error_text.into(),
        }
    }

    #[test]
    fn test_render_replaces_both_placeholders() {
        let out = render_template(
            "<p>[[your_ip]] is not in [[valid_ips]]; [[your_ip]] again</p>",
            "10.0.0.0/8",
            "8.8.8.8",
        );
        assert_eq!(out, "<p>8.8.8.8 is not in 10.0.0.0/8; 8.8.8.8 again</p>");
    }

    #[test]
    fn test_render_keeps_unknown_tokens() {
        let out = render_template("[[site]] [[ [[your_ip]] [[", "x", "1.2.3.4");
        assert_eq!(out, "[[site]] [[ 1.2.3.4 [[");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render_template("[[valid_ips]]", "[[your_ip]]", "1.2.3.4");
        assert_eq!(out, "[[your_ip]]");
    }

    #[test]
    fn test_denial_message_falls_back_to_default() {
        let address: IpAddr = "8.8.8.8".parse().expect("ip");
        let blank = settings("10.0.0.1", "   ");
        assert_eq!(
            denial_message(&blank, "Denied for [[your_ip]]", address),
            "Denied for 8.8.8.8"
        );

        let custom = settings("10.0.0.1", "Only [[valid_ips]]");
        assert_eq!(
            denial_message(&custom, "unused", address),
            "Only 10.0.0.1"
        );
    }

    #[test]
    fn test_lockout_warning() {
        let settings = settings("10.0.0.0/8", "");
        let inside: IpAddr = "10.1.1.1".parse().expect("ip");
        let outside: IpAddr = "192.168.1.1".parse().expect("ip");
        assert!(lockout_warning(&settings, inside).is_none());
        let warning = lockout_warning(&settings, outside).expect("warning");
        assert!(warning.contains("192.168.1.1"));
    }
}
