//! Keyword based spot classification.

use crate::normalize::nfc;

/// Keyword -> spot title. Scanned top to bottom, first hit wins, so strong
/// keywords come before the weak single-character fallbacks.
pub const KEYWORD_TO_SPOT_TITLE: &[(&str, &str)] = &[
    // strong
    ("帆曳船", "りんりんポート土浦"),
    ("white iris", "りんりんポート土浦"),
    ("ホワイトアイリス", "りんりんポート土浦"),
    ("帰港", "りんりんポート土浦"),
    ("鐘", "幸せの鐘"),
    ("水車", "水車"),
    ("風車", "風車"),
    ("野球", "多目的広場"),
    ("サッカー", "多目的広場"),
    ("ソフトボール", "多目的広場"),
    ("滝", "水郷の滝"),
    ("ひこうき", "ツェッペリン号"),
    ("飛行機", "ツェッペリン号"),
    // medium
    ("水路", "風車"),
    ("板", "風車"),
    ("デッキ", "レストハウス"),
    ("じゃり", "レストハウス"),
    ("自販機", "レストハウス"),
    ("扉", "レストハウス"),
    ("箱", "レストハウス"),
    ("鉄琴", "レストハウス"),
    ("鎖", "レストハウス"),
    ("水槽", "レストハウス"),
    ("階段", "風車"),
    ("砂", "散歩道"),
    ("足音", "ジョギングコース"),
    ("枯葉", "ジョギングコース"),
    ("ドングリ", "ジョギングコース"),
    ("どんぐり", "ジョギングコース"),
    ("鳥", "森1"),
    ("さえずり", "森1"),
    ("薮", "森1"),
    ("虫", "森1"),
    ("木", "森1"),
    // weak fallback
    ("水", "水郷の滝"),
    ("池", "水郷の滝"),
    ("川", "水郷の滝"),
];

/// Guess the spot title for a descriptor using [`KEYWORD_TO_SPOT_TITLE`].
pub fn guess_spot_title(descriptor: &str) -> Option<&'static str> {
    guess_with_table(descriptor, KEYWORD_TO_SPOT_TITLE)
}

/// Case-insensitive substring scan of an ordered keyword table.
pub fn guess_with_table<'t>(descriptor: &str, table: &[(&str, &'t str)]) -> Option<&'t str> {
    let haystack = nfc(descriptor).to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| haystack.contains(&keyword.to_lowercase()))
        .map(|(_, title)| *title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_keyword_wins_regardless_of_position() {
        assert_eq!(guess_spot_title("水辺の鳥"), Some("森1"));
        assert_eq!(guess_spot_title("鳥_水"), Some("森1"));
    }

    #[test]
    fn scenario_descriptors() {
        assert_eq!(guess_spot_title("公園内散策_野球"), Some("多目的広場"));
        assert_eq!(guess_spot_title("滝_1"), Some("水郷の滝"));
        // 水車 precedes the weak 水 fallback
        assert_eq!(guess_spot_title("水車の音"), Some("水車"));
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(guess_spot_title("White_Iris_take1"), None);
        assert_eq!(guess_spot_title("WHITE IRIS"), Some("りんりんポート土浦"));
    }

    #[test]
    fn no_keyword_is_none() {
        assert_eq!(guess_spot_title("UnknownContent"), None);
    }

    #[test]
    fn custom_table_order_matters() {
        let table = [("b", "B"), ("a", "A")];
        assert_eq!(guess_with_table("ab", &table), Some("B"));
    }
}
