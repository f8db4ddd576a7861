// User-visible status texts.

pub const EMPTY_KEYWORD: &str = "지역명을 입력하세요.";
pub const SEARCHING: &str = "지역 검색 중...";
pub const NO_COMPLEXES: &str = "해당 지역에 단지가 없습니다.";
pub const SEARCH_FAILED: &str = "검색 중 오류가 발생했습니다.";

pub const SELECT_COMPLEX: &str = "단지를 선택하세요.";
pub const FETCHING: &str = "데이터 수집 중...";
pub const NO_LISTINGS: &str = "수집된 데이터가 없습니다.";
pub const FETCH_FAILED: &str = "데이터 수집 중 오류가 발생했습니다.";

pub const NOTHING_TO_EXPORT: &str = "다운로드할 데이터가 없습니다.";
pub const EXPORT_FAILED: &str = "엑셀 다운로드 중 오류가 발생했습니다.";

pub const NO_SUCH_CELL: &str = "수정할 셀을 찾을 수 없습니다.";
pub const ALREADY_RUNNING: &str = "이미 요청을 처리하고 있습니다.";

pub fn complexes_found(n: usize) -> String {
    format!("{n}개의 단지를 찾았습니다.")
}

pub fn listings_collected(n: usize) -> String {
    format!("총 {n}개의 매물을 수집했습니다.")
}

pub fn exported(n: usize) -> String {
    format!("{n}개의 매물을 엑셀로 내보냈습니다.")
}

pub fn server_error(msg: &str) -> String {
    format!("오류: {msg}")
}

pub const UNKNOWN_SERVER_ERROR: &str = "오류: 알 수 없는 오류";
