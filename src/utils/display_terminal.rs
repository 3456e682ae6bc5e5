//! 기동 시 레지스트리 상태를 터미널에 출력합니다.
//!
//! ```text
//! ╔════════════════════════════════════════════════╗
//! ║          🔄 leadflow registry bootstrap        ║
//! ╚════════════════════════════════════════════════╝
//! [1/2] repositories
//!    ├─ subscription_repository
//!    └─ 9 ready
//! ```

const BOX_WIDTH: usize = 48;

pub fn print_banner(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH);
    println!("╚{}╝", border);
}

/// `[단계/전체] 이름` 형식의 단계 헤더
pub fn print_phase(phase: u8, total: u8, label: &str) {
    println!("[{}/{}] {}", phase, total, label);
}

pub fn print_component(name: &str) {
    println!("   ├─ {}", name);
}

pub fn print_phase_done(count: usize) {
    println!("   └─ {} ready", count);
}

/// 인프라 클라이언트, 리포지토리, 서비스 개수 요약
pub fn print_registry_summary(clients: usize, repositories: usize, services: usize) {
    println!();
    println!(
        "🚀 registry ready: {} clients, {} repositories, {} services",
        clients, repositories, services
    );
    println!();
}
