use once_cell::sync::Lazy;
use regex::Regex;

// Keycloak 用户 ID 为 UUID，只放行其字符集，避免拼接出其他管理 API 路径
static USER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{1,64}$").expect("Invalid user id regex"));

pub fn validate_user_id(user_id: &str) -> Result<(), &'static str> {
    if !USER_ID_RE.is_match(user_id) {
        return Err("User id format is invalid");
    }
    Ok(())
}

/// 上传文件名校验，返回去除路径后的文件名
pub fn sanitize_file_name(file_name: &str) -> Result<String, &'static str> {
    // 浏览器可能带上客户端路径
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err("File name is missing");
    }
    if name.len() > 255 {
        return Err("File name is too long");
    }
    if name.chars().any(|c| c.is_control() || c == '"') {
        return Err("File name contains invalid characters");
    }
    Ok(name.to_string())
}
