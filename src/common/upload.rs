// src/common/upload.rs

// Tipos de imagem aceitos no upload de fotos de veículos
pub const ALLOWED_IMAGE_MIMES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

// 5MB por arquivo
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

// Máximo de arquivos por requisição
pub const MAX_FILES_PER_REQUEST: usize = 10;

pub fn is_allowed_image(mime: &str) -> bool {
    ALLOWED_IMAGE_MIMES.contains(&mime)
}

// Gera um nome único: <timestamp>_<16 hex>.<ext>
// O hex aleatório evita colisão entre uploads no mesmo milissegundo.
pub fn generate_file_name(original_name: &str) -> String {
    let ext = std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "jpg".to_string());

    let id: String = (0..8)
        .map(|_| format!("{:02x}", rand::random::<u8>()))
        .collect();

    format!("{}_{}.{}", chrono::Utc::now().timestamp_millis(), id, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_apenas_imagens() {
        assert!(is_allowed_image("image/png"));
        assert!(is_allowed_image("image/webp"));
        assert!(!is_allowed_image("application/pdf"));
        assert!(!is_allowed_image("text/html"));
    }

    #[test]
    fn nome_gerado_preserva_extensao_em_minusculas() {
        let name = generate_file_name("Foto do Carro.JPG");
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn nomes_gerados_nao_colidem() {
        let a = generate_file_name("a.png");
        let b = generate_file_name("a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn usa_extensao_padrao_quando_ausente() {
        assert!(generate_file_name("semextensao").ends_with(".jpg"));
    }
}
