/// Sentences used when neither the command line, the config nor an input
/// file supplies any.
pub const SAMPLE_SENTENCES: &[&str] = &[
    "IT부서의 최명재 팀장, 신예준 팀장이 2월1일-2월5일 일본 도쿄로 출장을 갈려고해. 예산은 최대 500만원이야.",
    "김민수와 정혜진이 서울에서 부산으로 출장 간다. 3월 15일부터 3월 17일까지.",
    "최명재와 이재영이 서울에서 부산으로 3월 15일부터 3월 17일까지 출장을 갑니다.",
    "총 4명이 대전에서 제주로 6월 3일 하루 출장 갑니다.",
    "다음 달 10월 20일부터 23일까지 박서준 과장과 이도윤 대리가 싱가포르로 출장 예정이고 예산은 300만원 이내입니다.",
    "나랑 김하늘 대리가 2025년 11월 4일에서 11월 6일까지 광주로 출장 가요. 경비는 80만원.",
];
