pub mod csv_handler;

/// 生成图片 id："IMG" + 6 位大写十六进制
pub fn generate_image_id() -> String {
    format!("IMG{:06X}", rand::random_range(0..=0xFF_FFFFu32))
}

/// 按 Unicode 标量计数的去空白长度
pub fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}
