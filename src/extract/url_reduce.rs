use url::Url;

/// Reduce a URL to `scheme://host[:port]`, dropping userinfo, path, query and
/// fragment. The authority is kept as written, so an explicit default port
/// (`http://host:80`) survives. Values that do not parse as an absolute URL
/// with a host are returned unchanged.
pub fn reduce_url(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        return raw.to_string();
    };
    if !parsed.has_host() {
        return raw.to_string();
    }
    let Some((_, rest)) = raw.split_once("://") else {
        return raw.to_string();
    };

    let end = rest.find(|c: char| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    let authority = &rest[..end];
    let authority = authority.rsplit_once('@').map(|(_, host)| host).unwrap_or(authority);
    format!("{}://{}", parsed.scheme(), authority)
}
