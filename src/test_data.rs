#[cfg(test)]
pub const SUBMISSION_PUBLISHED: &str = "Plantilla de envío de artículos
(rellena cada sección)

Title:
Nuevo chip de Apple

Body:
# Un salto enorme

Apple presentó hoy su nuevo chip.
Promete el doble de rendimiento.

- Más núcleos
- Menos consumo

Tags (comma-separated):
Hardware, Apple, chips

Date Created (YYYY-MM-DD):
2024-03-05

Time Created (HH:MM, 24h):
09:41

Author:
ana

Summary/Excerpt:
El nuevo chip promete el doble de rendimiento.

Featured Image URL:
chip.jpg

Featured Image Alt:

Slug (URL-friendly title):
nuevo-chip

Category:
Hardware

Status (draft/published):
Published

Additional Notes:
Revisar cifras con el fabricante.
";

#[cfg(test)]
pub const AUTHORS_JSON: &str = r#"{
  "ana": {
    "name": "Ana Torres",
    "title": "Editora de hardware",
    "bio": "Escribe sobre chips & silicio.",
    "image": "authors/ana.jpg"
  },
  "luis": {
    "title": "Redactor"
  }
}"#;

#[cfg(test)]
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<body>
  <section class="hero">
        <!-- featured:begin -->
        <p>old hero</p>
        <!-- featured:end -->
  </section>
  <section class="stream">
        <!-- stream:begin -->
        <p>old stream</p>
        <!-- stream:end -->
  </section>
</body>
</html>
"#;

/// Builds a submission out of the fields that matter for ordering and
/// selection.
#[cfg(test)]
pub fn submission(title: &str, slug: &str, tags: &str, date: &str, time: &str, status: &str) -> String {
    format!(
        "Title:\n{}\nBody:\nCuerpo de {}.\nTags (comma-separated):\n{}\nDate Created (YYYY-MM-DD):\n{}\n\
Time Created (HH:MM, 24h):\n{}\nAuthor:\nana\nSummary/Excerpt:\nResumen de {}\nFeatured Image URL:\n{}.jpg\n\
Slug (URL-friendly title):\n{}\nCategory:\nTecnología\nStatus (draft/published):\n{}\n",
        title, title, tags, date, time, title, slug, slug, status
    )
}
