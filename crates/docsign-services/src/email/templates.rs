//! Hebrew email bodies for the signing workflow.

pub const SIGNING_LINK_SUBJECT: &str = "חתום על המסמך שלך";
pub const SIGNED_COPY_SUBJECT: &str = "המסמך החתום שלך";

pub struct RenderedBody {
    pub html: String,
    pub text: String,
}

pub fn signing_link(link: &str) -> RenderedBody {
    let link_html = escape_html(link);
    RenderedBody {
        html: format!(
            "<div dir=\"rtl\"><p>שלום,</p><p>לחתימה על המסמך שלך:</p><a href=\"{0}\">{0}</a></div>",
            link_html
        ),
        text: format!("שלום,\nלחתימה על המסמך שלך:\n{}\n", link),
    }
}

pub fn signed_copy(signer_name: &str, download_url: &str) -> RenderedBody {
    let name_html = escape_html(signer_name);
    let url_html = escape_html(download_url);
    RenderedBody {
        html: format!(
            "<div dir=\"rtl\"><p>שלום,</p><p>המסמך נחתם על ידי {}.</p>\
             <p>עותק חתום מצורף למייל זה, וניתן גם להוריד אותו כאן:</p>\
             <a href=\"{1}\">{1}</a></div>",
            name_html, url_html
        ),
        text: format!(
            "שלום,\nהמסמך נחתם על ידי {}.\nעותק חתום מצורף למייל זה, וניתן גם להוריד אותו כאן:\n{}\n",
            signer_name, download_url
        ),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
