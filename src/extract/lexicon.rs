//! Built-in word lists. Every list can be extended through configuration.

/// Countries and cities recognised by the location extractor.
pub const LOCATIONS: &[&str] = &[
    // 국내
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종", "제주", "수원", "성남",
    "고양", "용인", "창원", "청주", "천안", "전주", "포항", "경주", "강릉", "춘천", "여수",
    "목포", "순천", "평택", "판교", "구미", "김해",
    // 해외 국가
    "한국", "일본", "중국", "미국", "영국", "프랑스", "독일", "이탈리아", "스페인", "캐나다",
    "호주", "베트남", "태국", "싱가포르", "인도네시아", "인도", "대만", "홍콩", "필리핀",
    "말레이시아", "멕시코", "브라질", "네덜란드", "스위스",
    // 해외 도시
    "도쿄", "오사카", "교토", "후쿠오카", "삿포로", "나고야", "베이징", "상하이",
    "뉴욕", "로스앤젤레스", "샌프란시스코", "라스베이거스", "시애틀", "워싱턴", "보스턴",
    "시카고", "런던", "파리", "베를린", "프랑크푸르트", "뮌헨", "로마", "밀라노", "마드리드",
    "바르셀로나", "하노이", "호치민", "다낭", "방콕", "자카르타", "타이베이", "시드니",
    "멜버른", "토론토", "밴쿠버", "두바이", "암스테르담", "취리히", "마닐라", "쿠알라룸푸르",
];

/// Job titles that follow a name (`최명재 팀장`).
pub const TITLES: &[&str] = &[
    "팀장", "부장", "과장", "차장", "대리", "사원", "주임", "이사", "상무", "전무", "사장",
    "부사장", "대표", "회장", "매니저", "선임", "책임", "수석", "실장", "본부장", "센터장",
    "연구원", "파트장", "그룹장", "팀원", "인턴", "교수", "박사",
];

/// Phrases after which the names of fellow travelers follow.
pub const COMPANION_TRIGGERS: &[&str] = &[
    "나와 함께", "저와 함께", "나랑 같이", "저랑 같이", "나와 같이", "저와 같이",
    "우리 팀원은", "저희 팀원은", "팀원은", "동행자는", "출장자는", "참석자는",
    "함께 가는 사람은", "같이 가는 사람은",
];

/// Triggers implying the speaker travels too.
pub const SPEAKER_MARKERS: &[&str] = &["나와", "저와", "나랑", "저랑", "나하고", "저하고"];

/// Trailing particles and copulas stripped from name candidates, longest first.
pub const NAME_SUFFIXES: &[&str] = &[
    "이에요", "입니다", "이랑", "하고", "께서", "에게", "한테", "이야", "이고", "이며",
    "에서", "으로", "와", "과", "랑", "이", "가", "은", "는", "도", "의", "을", "를", "로",
    "님", "씨", "야", "고",
];

/// Single-character suffixes that also end many given names; only stripped
/// from words long enough to still hold a full name afterwards.
pub const NAME_FINAL_SUFFIXES: &[&str] = &["이", "가", "은", "야", "고"];

/// Grammatical markers, pronouns and domain nouns that are never names.
pub const STOP_WORDS: &[&str] = &[
    // 대명사, 조사, 어미
    "나", "저", "우리", "저희", "제가", "내가", "너", "당신", "그", "이", "가", "은", "는",
    "을", "를", "의", "도", "와", "과", "랑", "에", "에서", "으로", "로", "부터", "까지",
    "하고", "그리고", "및", "또", "또는", "함께", "같이", "혼자", "모두", "다들", "총",
    "입니다", "이야", "이에요", "예요", "해요", "합니다", "한다", "간다", "가요", "갑니다",
    "갈려고해", "가려고", "가려고해", "갈", "가고", "예정", "예정이야", "있어", "있다",
    "해", "좀", "정도", "이내", "이하", "이상", "하루", "당일",
    // 출장 관련 명사
    "출장", "출장자", "출장지", "일정", "예산", "경비", "비용", "출장비", "숙박", "숙소",
    "항공", "항공권", "호텔", "교통", "식비", "최대", "최소", "최고", "만원", "원", "달러",
    "회의", "미팅", "방문", "세미나", "컨퍼런스", "전시회", "박람회", "교육", "워크숍",
    "고객", "고객사", "본사", "지사", "지점", "공장", "현장", "사무실", "부서", "팀", "팀원",
    "직원", "동료", "사람", "인원", "명", "분",
    // 시간 표현
    "오늘", "내일", "모레", "이번", "다음", "지난", "주", "이번주", "다음주", "주말", "월요일",
    "화요일", "수요일", "목요일", "금요일", "토요일", "일요일", "오전", "오후", "년", "월", "일",
];
