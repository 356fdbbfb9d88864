//! Reference catalog loaded into fresh stores.
//! Keep in sync with `migrations/20240101000000_create_books.sql`.

use crate::models::Book;

pub const SUENOS_DE_ACERO_Y_NEON_TITLE: &str = "SUEÑOS DE ACERO Y NEON";
pub const SUENOS_DE_ACERO_Y_NEON_DESCRIPTION: &str = "Los personajes que protagonizan este relato sobreviven en una sociedad en decadencia a la que, no obstante, lograrán devolver la posibilidad de un futuro. Año 2484. En un mundo dominado por las grandes corporaciones, solo un hombre, Jordi Thompson, detective privado deslenguado y vividor, pero de gran talento y sentido d...";
pub const LA_VIDA_SECRETA_DE_LA_MENTE_TITLE: &str = "LA VIDA SECRETA DE LA MENTE";
pub const LA_VIDA_SECRETA_DE_LA_MENTE_DESCRIPTION: &str = "La vida secreta de la mentees un viaje especular que recorre el cerebro y el pensamiento: se trata de descubrir nuestra mente para entendernos hasta en los más pequeños rincones que componen lo que somos, cómo forjamos las ideas en los primeros días de vida, cómo damos forma a las decisiones que nos constituyen, cómo soñamos y cómo imaginamos, por qué sentimos ciertas emociones hacia los demás, cómo los demás influyen en nosotros, y cómo el cerebro se transforma y, con él, lo que somos.";
pub const CASI_SIN_QUERER_TITLE: &str = "CASI SIN QUERER";
pub const CASI_SIN_QUERER_DESCRIPTION: &str = "El amor, el desamor y todo lo que queda entre medias, contado en textos breves que se leen casi sin querer.";
pub const TERMINAMOS_POEMAS_TITLE: &str = "TERMINAMOS Y OTROS POEMAS SIN TERMINAR";
pub const TERMINAMOS_POEMAS_DESCRIPTION: &str = "Poemas sobre las relaciones que acaban y las que nunca terminan de acabar.";
pub const LEGION_PERDIDA_TITLE: &str = "LA LEGIÓN PERDIDA";
pub const LEGION_PERDIDA_DESCRIPTION: &str = "Año 53 a. C. Las legiones de Craso cruzan el Éufrates rumbo a Partia; su destino marcará la historia de Roma durante décadas.";

/// The five reference books, in id order (ids 1 to 5 once stored)
pub fn reference_catalog() -> Vec<Book> {
    vec![
        Book::new(SUENOS_DE_ACERO_Y_NEON_TITLE, SUENOS_DE_ACERO_Y_NEON_DESCRIPTION),
        Book::new(LA_VIDA_SECRETA_DE_LA_MENTE_TITLE, LA_VIDA_SECRETA_DE_LA_MENTE_DESCRIPTION),
        Book::new(CASI_SIN_QUERER_TITLE, CASI_SIN_QUERER_DESCRIPTION),
        Book::new(TERMINAMOS_POEMAS_TITLE, TERMINAMOS_POEMAS_DESCRIPTION),
        Book::new(LEGION_PERDIDA_TITLE, LEGION_PERDIDA_DESCRIPTION),
    ]
}
