//! Prompt construction for news impact analysis

use watch_core::AnalysisRequest;

/// Placeholder handed to the model when no article body could be extracted
const MISSING_BODY: &str = "[Không trích được nội dung, hãy dựa trên tiêu đề và snippet]";

pub const SYSTEM_PROMPT: &str =
    "Bạn là chuyên gia phân tích doanh nghiệp/chứng khoán Việt Nam. Trả lời bằng tiếng Việt, ngắn gọn, rõ ràng.";

/// Build the analysis prompt for one news item
pub fn build_prompt(request: &AnalysisRequest) -> String {
    let subject = if request.display_name.is_empty() {
        request.code.clone()
    } else {
        format!("{} ({})", request.code, request.display_name)
    };

    let body = if request.body.trim().is_empty() {
        MISSING_BODY
    } else {
        request.body.as_str()
    };

    format!(
        r#"Hãy phân tích tin sau (nếu là tiếng Anh hãy dịch và tóm tắt bằng tiếng Việt) và đánh giá ảnh hưởng đến cổ phiếu {}.

Tiêu đề: {}
Tóm tắt/RSS snippet (nếu có): {}
Nội dung bài báo (đã trích): {}
Link: {}

Yêu cầu output (Tiếng Việt, ngắn gọn, rõ ràng):
1) 🧾 **Tóm tắt 1-2 câu**
2) 🎯 **Ảnh hưởng tới doanh nghiệp/cổ phiếu**: Tích cực / Trung tính / Tiêu cực
3) 📈 **Mức độ ảnh hưởng**: Thấp / Trung bình / Cao (kèm lý do)
4) 🔎 **Điều cần theo dõi tiếp**: 2-3 bullet
5) ⚠️ **Rủi ro/giả định**: 1-2 bullet (nếu có)"#,
        subject.trim(),
        request.title,
        request.snippet,
        body,
        request.link
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> AnalysisRequest {
        AnalysisRequest {
            code: "HPG".to_string(),
            display_name: "Hòa Phát".to_string(),
            title: "HPG công bố lợi nhuận quý 3".to_string(),
            snippet: "Doanh thu tăng 10%".to_string(),
            body: body.to_string(),
            link: "https://cafef.vn/hpg".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_item_fields() {
        let prompt = build_prompt(&request("Nội dung chi tiết"));
        assert!(prompt.contains("cổ phiếu HPG (Hòa Phát)"));
        assert!(prompt.contains("Tiêu đề: HPG công bố lợi nhuận quý 3"));
        assert!(prompt.contains("Doanh thu tăng 10%"));
        assert!(prompt.contains("Nội dung chi tiết"));
        assert!(prompt.contains("Link: https://cafef.vn/hpg"));
    }

    #[test]
    fn test_prompt_uses_placeholder_without_body() {
        let prompt = build_prompt(&request("  "));
        assert!(prompt.contains(MISSING_BODY));
    }

    #[test]
    fn test_prompt_without_display_name() {
        let mut req = request("x");
        req.display_name.clear();
        assert!(build_prompt(&req).contains("cổ phiếu HPG."));
    }
}
